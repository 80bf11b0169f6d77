use std::collections::{HashMap, VecDeque};

use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::math::lcm_all;
use crate::utils::parsing::non_empty_lines;

/// Pulse Propagation
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 20, tags = ["simulation", "math"])]
pub struct Solver;

const PRESS_LIMIT: u64 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Broadcaster,
    FlipFlop,
    Conjunction,
    /// Named only as a destination
    Sink,
}

#[derive(Debug)]
struct Module<'a> {
    name: &'a str,
    kind: Kind,
    outputs: Vec<usize>,
    inputs: Vec<usize>,
}

/// Module wiring with names resolved to indices
#[derive(Debug)]
pub struct Network<'a> {
    modules: Vec<Module<'a>>,
    broadcaster: usize,
}

/// Flip-flop states and conjunction memories
struct State {
    on: Vec<bool>,
    /// `memory[to][from]`: last pulse `from` sent to conjunction `to`
    memory: Vec<Vec<bool>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pulse {
    from: usize,
    to: usize,
    high: bool,
}

fn parse_network(input: &str) -> anyhow::Result<Network<'_>> {
    let mut declared = Vec::new();
    for line in non_empty_lines(input) {
        let (source, targets) = line
            .split_once(" -> ")
            .ok_or_else(|| anyhow!("expected '<module> -> <targets>', got {line:?}"))?;
        let (kind, name) = match source.as_bytes().first() {
            Some(b'%') => (Kind::FlipFlop, &source[1..]),
            Some(b'&') => (Kind::Conjunction, &source[1..]),
            _ if source == "broadcaster" => (Kind::Broadcaster, source),
            _ => bail!("unknown module type {source:?}"),
        };
        ensure!(!name.is_empty(), "module without a name in {line:?}");
        let targets: Vec<&str> = targets.split(',').map(str::trim).collect();
        ensure!(
            targets.iter().all(|t| !t.is_empty()),
            "empty target name in {line:?}"
        );
        declared.push((name, kind, targets));
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut modules: Vec<Module<'_>> = Vec::new();
    for &(name, kind, _) in &declared {
        ensure!(!index.contains_key(name), "module {name} declared twice");
        index.insert(name, modules.len());
        modules.push(Module {
            name,
            kind,
            outputs: Vec::new(),
            inputs: Vec::new(),
        });
    }

    for (name, _, targets) in &declared {
        let from = index[name];
        for &target in targets {
            let to = *index.entry(target).or_insert_with(|| {
                modules.push(Module {
                    name: target,
                    kind: Kind::Sink,
                    outputs: Vec::new(),
                    inputs: Vec::new(),
                });
                modules.len() - 1
            });
            modules[from].outputs.push(to);
            modules[to].inputs.push(from);
        }
    }

    let broadcaster = *index
        .get("broadcaster")
        .ok_or_else(|| anyhow!("no broadcaster module"))?;
    Ok(Network {
        modules,
        broadcaster,
    })
}

impl Network<'_> {
    fn fresh_state(&self) -> State {
        let n = self.modules.len();
        State {
            on: vec![false; n],
            memory: vec![vec![false; n]; n],
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.name == name)
    }

    /// Push the button once, reporting every pulse sent
    fn press(&self, state: &mut State, mut observe: impl FnMut(Pulse)) {
        let mut queue = VecDeque::from([Pulse {
            from: self.broadcaster,
            to: self.broadcaster,
            high: false,
        }]);

        while let Some(pulse) = queue.pop_front() {
            observe(pulse);
            let module = &self.modules[pulse.to];
            let send = match module.kind {
                Kind::Broadcaster => Some(pulse.high),
                Kind::FlipFlop if pulse.high => None,
                Kind::FlipFlop => {
                    state.on[pulse.to] = !state.on[pulse.to];
                    Some(state.on[pulse.to])
                }
                Kind::Conjunction => {
                    let memory = &mut state.memory[pulse.to];
                    memory[pulse.from] = pulse.high;
                    Some(!module.inputs.iter().all(|&i| memory[i]))
                }
                Kind::Sink => None,
            };
            if let Some(high) = send {
                queue.extend(module.outputs.iter().map(|&to| Pulse {
                    from: pulse.to,
                    to,
                    high,
                }));
            }
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_network(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut state = shared.fresh_state();
        let (mut low, mut high) = (0u64, 0u64);
        for _ in 0..1000 {
            shared.press(&mut state, |pulse| {
                if pulse.high {
                    high += 1;
                } else {
                    low += 1;
                }
            });
        }
        Ok((low * high).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Presses until `rx` gets a low pulse
    ///
    /// `rx` hangs off a single conjunction whose inputs each turn high on a
    /// fixed period, so the answer is the lcm of the first high press of each.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rx = shared
            .find("rx")
            .ok_or_else(|| SolveError::failed("no rx module"))?;
        let hub = match shared.modules[rx].inputs.as_slice() {
            [hub] if shared.modules[*hub].kind == Kind::Conjunction => *hub,
            _ => return Err(SolveError::failed("rx is not fed by a single conjunction")),
        };

        let feeders = &shared.modules[hub].inputs;
        let mut first_high: Vec<Option<u64>> = vec![None; feeders.len()];
        let mut state = shared.fresh_state();

        for presses in 1..=PRESS_LIMIT {
            shared.press(&mut state, |pulse| {
                if pulse.high && pulse.to == hub {
                    if let Some(slot) = feeders.iter().position(|&f| f == pulse.from) {
                        first_high[slot].get_or_insert(presses);
                    }
                }
            });
            if first_high.iter().all(Option::is_some) {
                return lcm_all(first_high.iter().flatten().copied())
                    .map(|n| n.to_string())
                    .ok_or_else(|| SolveError::failed("rx feeder has no inputs"));
            }
        }
        Err(SolveError::failed(format!(
            "rx feeders did not all fire within {PRESS_LIMIT} presses"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE_1: &str = "broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
";

    const SAMPLE_2: &str = "broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";

    /// Two counters feeding `rx`: one fires every 2 presses, the other every 4
    const COUNTERS: &str = "broadcaster -> a, b
%a -> ca
%b -> b2
%b2 -> cb
&ca -> hub
&cb -> hub
&hub -> rx
";

    #[test]
    fn test_part1_samples() {
        assert_eq!(solve::<Solver>(SAMPLE_1, 1), "32000000");
        assert_eq!(solve::<Solver>(SAMPLE_2, 1), "11687500");
    }

    #[test]
    fn test_part2_counters() {
        assert_eq!(solve::<Solver>(COUNTERS, 2), "4");
    }

    #[test]
    fn test_part2_without_rx_fails() {
        let mut shared = <Solver as AocParser>::parse(SAMPLE_1).unwrap();
        assert!(matches!(
            <Solver as PartSolver<2>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_sink_modules_are_created() {
        let network = <Solver as AocParser>::parse(SAMPLE_2).unwrap();
        let output = network.find("output").unwrap();
        assert_eq!(network.modules[output].kind, Kind::Sink);
        assert_eq!(network.modules[output].inputs.len(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert!(<Solver as AocParser>::parse("%a -> b\n").is_err());
        assert!(<Solver as AocParser>::parse("broadcaster -> a\n?a -> b\n").is_err());
        assert!(<Solver as AocParser>::parse("broadcaster -> a\n%a -> b\n%a -> c\n").is_err());
    }

    #[test]
    fn test_empty_target_names_are_rejected() {
        for input in [
            "broadcaster -> \n",
            "broadcaster -> a,\n%a -> b\n",
            "broadcaster -> a, , b\n",
            "broadcaster -> a\n% -> b\n",
        ] {
            let err = <Solver as AocParser>::parse(input).unwrap_err();
            assert!(matches!(err, ParseError::InvalidFormat(_)), "{input:?}");
        }
    }
}
