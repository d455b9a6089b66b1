use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{config::InputConfig, graph::Graph, Result, VisualiserError};

/// Borrowed view of whatever the selected algorithm runs over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dataset<'a> {
    Array(&'a [i64]),
    Graph(&'a Graph),
}

impl Dataset<'_> {
    pub fn len(&self) -> usize {
        match self {
            Dataset::Array(values) => values.len(),
            Dataset::Graph(graph) => graph.node_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses comma separated integers. Each token contributes its leading
/// integer (`"3.5"` is 3, `"10px"` is 10); tokens that do not start with one
/// are skipped, and an input without a single valid number is rejected.
pub fn parse_custom_input(text: &str) -> Result<Vec<i64>> {
    let values: Vec<i64> = text.split(',').filter_map(leading_integer).collect();

    if values.is_empty() {
        return Err(VisualiserError::invalid_input(
            "expected comma-separated numbers, e.g. `5, 3, 8, 1`",
        ));
    }

    Ok(values)
}

/// Reads the integer at the start of `token`: optional sign, then decimal
/// digits or a `0x` hex literal. Values outside `i64` are rejected.
fn leading_integer(token: &str) -> Option<i64> {
    let token = token.trim_start();
    let (negative, rest) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = rest
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = i128::from_str_radix(&rest[..end], radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Deterministic source of random input arrays.
#[derive(Debug, Clone)]
pub struct RandomArrays {
    rng: ChaCha8Rng,
    min_value: i64,
    max_value: i64,
}

impl RandomArrays {
    /// Seeds from `config.seed`, or from the OS when no seed is configured.
    pub fn from_config(config: &InputConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            rng,
            min_value: config.min_value.min(config.max_value),
            max_value: config.max_value.max(config.min_value),
        }
    }

    pub fn generate(&mut self, size: usize) -> Vec<i64> {
        (0..size)
            .map(|_| self.rng.gen_range(self.min_value..=self.max_value))
            .collect()
    }
}
