//! Advent of Code 2022, days 1 to 25

use aoc_solver::{RegistrationError, SolverRegistryBuilder};

pub mod day_1;
pub mod day_2;
pub mod day_3;
pub mod day_4;
pub mod day_5;
pub mod day_6;
pub mod day_7;
pub mod day_8;
pub mod day_9;
pub mod day_10;
pub mod day_11;
pub mod day_12;
pub mod day_13;
pub mod day_14;
pub mod day_15;
pub mod day_16;
pub mod day_17;
pub mod day_18;
pub mod day_19;
pub mod day_20;
pub mod day_21;
pub mod day_22;
pub mod day_23;
pub mod day_24;
pub mod day_25;

/// Register every 2022 solver without going through the plugin inventory
pub fn register_year_2022(
    builder: SolverRegistryBuilder,
) -> Result<SolverRegistryBuilder, RegistrationError> {
    builder
        .register::<day_1::Solver>(2022, 1)?
        .register::<day_2::Solver>(2022, 2)?
        .register::<day_3::Solver>(2022, 3)?
        .register::<day_4::Solver>(2022, 4)?
        .register::<day_5::Solver>(2022, 5)?
        .register::<day_6::Solver>(2022, 6)?
        .register::<day_7::Solver>(2022, 7)?
        .register::<day_8::Solver>(2022, 8)?
        .register::<day_9::Solver>(2022, 9)?
        .register::<day_10::Solver>(2022, 10)?
        .register::<day_11::Solver>(2022, 11)?
        .register::<day_12::Solver>(2022, 12)?
        .register::<day_13::Solver>(2022, 13)?
        .register::<day_14::Solver>(2022, 14)?
        .register::<day_15::Solver>(2022, 15)?
        .register::<day_16::Solver>(2022, 16)?
        .register::<day_17::Solver>(2022, 17)?
        .register::<day_18::Solver>(2022, 18)?
        .register::<day_19::Solver>(2022, 19)?
        .register::<day_20::Solver>(2022, 20)?
        .register::<day_21::Solver>(2022, 21)?
        .register::<day_22::Solver>(2022, 22)?
        .register::<day_23::Solver>(2022, 23)?
        .register::<day_24::Solver>(2022, 24)?
        .register::<day_25::Solver>(2022, 25)
}

#[cfg(test)]
pub(crate) mod test_support {
    use aoc_solver::{AocParser, Solver};

    /// Parse `input` and solve `part`, panicking on any error
    pub fn solve<S: Solver>(input: &str, part: u8) -> String {
        let mut shared = <S as AocParser>::parse(input).expect("sample input should parse");
        S::solve_part(&mut shared, part).expect("sample input should solve")
    }
}
