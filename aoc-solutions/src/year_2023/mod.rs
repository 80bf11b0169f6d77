//! Advent of Code 2023, days 1 to 20

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

/// Register every 2023 solver without going through the plugin inventory
pub fn register_year_2023(
    builder: SolverRegistryBuilder,
) -> Result<SolverRegistryBuilder, RegistrationError> {
    builder
        .register::<day_1::Solver>(2023, 1)?
        .register::<day_2::Solver>(2023, 2)?
        .register::<day_3::Solver>(2023, 3)?
        .register::<day_4::Solver>(2023, 4)?
        .register::<day_5::Solver>(2023, 5)?
        .register::<day_6::Solver>(2023, 6)?
        .register::<day_7::Solver>(2023, 7)?
        .register::<day_8::Solver>(2023, 8)?
        .register::<day_9::Solver>(2023, 9)?
        .register::<day_10::Solver>(2023, 10)?
        .register::<day_11::Solver>(2023, 11)?
        .register::<day_12::Solver>(2023, 12)?
        .register::<day_13::Solver>(2023, 13)?
        .register::<day_14::Solver>(2023, 14)?
        .register::<day_15::Solver>(2023, 15)?
        .register::<day_16::Solver>(2023, 16)?
        .register::<day_17::Solver>(2023, 17)?
        .register::<day_18::Solver>(2023, 18)?
        .register::<day_19::Solver>(2023, 19)?
        .register::<day_20::Solver>(2023, 20)
}
