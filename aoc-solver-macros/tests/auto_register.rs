use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2030, day = 1, tags = ["macro-test", "lines"])]
struct LineCount;

impl AocParser for LineCount {
    type SharedData<'a> = usize;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.lines().count())
    }
}

impl PartSolver<1> for LineCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2030, day = 2, tags = ["macro-test"])]
struct ByteCount;

impl AocParser for ByteCount {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for ByteCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for ByteCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.bytes().filter(u8::is_ascii_digit).count().to_string())
    }
}

#[test]
fn test_plugins_are_collected() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let info = registry.storage().get_info(2030, 2).unwrap();
    assert_eq!(info.parts, 2);

    let mut solver = registry.create_solver(2030, 1, "a\nb").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "2");

    let mut solver = registry.create_solver(2030, 2, "a1b22").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "5");
    assert_eq!(solver.solve(2).unwrap().answer, "3");
}

#[test]
fn test_plugins_filter_by_tag() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"lines"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2030, 1));
    assert!(!registry.storage().contains(2030, 2));
}
