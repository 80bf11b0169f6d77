use std::collections::HashMap;

use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::interval::ClosedInterval;
use crate::utils::parsing::blocks;

/// Aplenty
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 19, tags = ["interval", "parsing"])]
pub struct Solver;

const CATEGORIES: [char; 4] = ['x', 'm', 'a', 's'];
const RATING_RANGE: (i64, i64) = (1, 4000);

type Ratings = [i64; 4];

/// `category < value` or `category > value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Condition {
    category: usize,
    less_than: bool,
    value: i64,
}

impl Condition {
    fn matches(&self, ratings: &Ratings) -> bool {
        let rating = ratings[self.category];
        if self.less_than {
            rating < self.value
        } else {
            rating > self.value
        }
    }

    /// All ratings the condition accepts, `None` if it can never pass
    fn passing(&self) -> Option<ClosedInterval> {
        if self.less_than {
            ClosedInterval::new(i64::MIN, self.value.checked_sub(1)?)
        } else {
            ClosedInterval::new(self.value.checked_add(1)?, i64::MAX)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rule<'a> {
    condition: Option<Condition>,
    target: &'a str,
}

/// Workflows keyed by name and the parts to sort
#[derive(Debug)]
pub struct System<'a> {
    workflows: HashMap<&'a str, Vec<Rule<'a>>>,
    parts: Vec<Ratings>,
}

fn parse_rule(rule: &str) -> anyhow::Result<Rule<'_>> {
    let Some((test, target)) = rule.split_once(':') else {
        return Ok(Rule {
            condition: None,
            target: rule,
        });
    };
    let mut chars = test.chars();
    let category = chars
        .next()
        .and_then(|c| CATEGORIES.iter().position(|&k| k == c))
        .ok_or_else(|| anyhow!("unknown category in {rule:?}"))?;
    let less_than = match chars.next() {
        Some('<') => true,
        Some('>') => false,
        _ => bail!("expected '<' or '>' in {rule:?}"),
    };
    let value = chars
        .as_str()
        .parse::<i64>()
        .with_context(|| format!("invalid value in {rule:?}"))?;
    Ok(Rule {
        condition: Some(Condition {
            category,
            less_than,
            value,
        }),
        target,
    })
}

fn parse_workflow(line: &str) -> anyhow::Result<(&str, Vec<Rule<'_>>)> {
    let (name, rules) = line
        .strip_suffix('}')
        .and_then(|l| l.split_once('{'))
        .ok_or_else(|| anyhow!("expected 'name{{rules}}', got {line:?}"))?;
    let rules = rules
        .split(',')
        .map(parse_rule)
        .collect::<anyhow::Result<Vec<_>>>()?;
    ensure!(
        rules.last().is_some_and(|r| r.condition.is_none()),
        "workflow {name} must end with a fallback target"
    );
    Ok((name, rules))
}

fn parse_part(line: &str) -> anyhow::Result<Ratings> {
    let body = line
        .strip_prefix('{')
        .and_then(|l| l.strip_suffix('}'))
        .ok_or_else(|| anyhow!("expected '{{x=..,m=..,a=..,s=..}}', got {line:?}"))?;
    let mut ratings = [0; 4];
    let mut seen = [false; 4];
    for field in body.split(',') {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("expected 'k=v', got {field:?}"))?;
        let index = key
            .chars()
            .next()
            .and_then(|c| CATEGORIES.iter().position(|&k| k == c))
            .filter(|_| key.len() == 1)
            .ok_or_else(|| anyhow!("unknown category {key:?}"))?;
        ratings[index] = value.parse().with_context(|| format!("invalid rating {value:?}"))?;
        seen[index] = true;
    }
    ensure!(seen.iter().all(|&s| s), "part {line:?} is missing a category");
    Ok(ratings)
}

fn parse_system(input: &str) -> anyhow::Result<System<'_>> {
    let blocks = blocks(input);
    let [workflow_lines, part_lines] = blocks.as_slice() else {
        bail!("expected a workflow section and a parts section");
    };
    let workflows = workflow_lines
        .iter()
        .copied()
        .map(parse_workflow)
        .collect::<anyhow::Result<HashMap<_, _>>>()?;
    ensure!(workflows.contains_key("in"), "no 'in' workflow");
    let parts = part_lines
        .iter()
        .copied()
        .map(parse_part)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(System { workflows, parts })
}

impl System<'_> {
    fn workflow(&self, name: &str) -> Result<&[Rule<'_>], SolveError> {
        self.workflows
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SolveError::failed(format!("unknown workflow {name}")))
    }

    fn accepts(&self, ratings: &Ratings) -> Result<bool, SolveError> {
        let mut name = "in";
        // a part visits each workflow at most once unless the rules loop
        for _ in 0..=self.workflows.len() {
            match name {
                "A" => return Ok(true),
                "R" => return Ok(false),
                _ => {}
            }
            name = self
                .workflow(name)?
                .iter()
                .find(|rule| rule.condition.is_none_or(|c| c.matches(ratings)))
                .map(|rule| rule.target)
                .ok_or_else(|| SolveError::failed(format!("workflow {name} has no fallback")))?;
        }
        Err(SolveError::failed("workflows loop"))
    }

    /// Number of rating combinations inside `ranges` that `name` accepts
    fn accepted_volume(
        &self,
        name: &str,
        mut ranges: [ClosedInterval; 4],
        depth: usize,
    ) -> Result<u64, SolveError> {
        match name {
            "A" => return Ok(ranges.iter().map(ClosedInterval::len).product()),
            "R" => return Ok(0),
            _ if depth > self.workflows.len() => {
                return Err(SolveError::failed("workflows loop"));
            }
            _ => {}
        }

        let mut total = 0;
        for rule in self.workflow(name)? {
            let Some(condition) = rule.condition else {
                return Ok(total + self.accepted_volume(rule.target, ranges, depth + 1)?);
            };
            let current = ranges[condition.category];
            let Some(passing) = condition.passing() else {
                continue;
            };

            if let Some(matched) = current.intersection(&passing) {
                let mut sent = ranges;
                sent[condition.category] = matched;
                total += self.accepted_volume(rule.target, sent, depth + 1)?;
            }
            // the passing range is unbounded on one side, so only one piece remains
            let (under, over) = current.difference(&passing);
            match under.or(over) {
                Some(rest) => ranges[condition.category] = rest,
                None => return Ok(total),
            }
        }
        Ok(total)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = System<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_system(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for part in &shared.parts {
            if shared.accepts(part)? {
                total += part.iter().sum::<i64>();
            }
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (low, high) = RATING_RANGE;
        let full = ClosedInterval::new(low, high)
            .ok_or_else(|| SolveError::failed("empty rating range"))?;
        Ok(shared.accepted_volume("in", [full; 4], 0)?.to_string())
    }
}
