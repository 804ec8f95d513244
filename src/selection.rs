//! Batch transformations over a set of selections.
//!
//! Every function takes the selections' current texts in order and returns
//! their replacement texts in the same order. Applying them back to the
//! document is up to the host.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::formula::{Formula, coerce_number};
use crate::value::Value;

/// Batches at least this large are evaluated on the rayon pool.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 64;

/// Number the selections `0, 1, 2, ...`.
pub fn index(count: usize) -> Vec<String> {
    let mut buf = itoa::Buffer::new();
    (0..count).map(|i| buf.format(i).to_string()).collect()
}

/// Add one to each selection's number.
pub fn increment<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    step(texts, 1.0)
}

/// Subtract one from each selection's number.
pub fn decrement<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    step(texts, -1.0)
}

fn step<S: AsRef<str>>(texts: &[S], delta: f64) -> Vec<String> {
    texts
        .iter()
        .map(|text| Value::Number(coerce_number(text.as_ref()) + delta).render())
        .collect()
}

/// Evaluate `formula` once per selection, with `x` bound to the selection's
/// number and `i` to its position.
///
/// The formula is parsed before anything is evaluated, so a parse error
/// rejects the whole batch.
pub fn map<S: AsRef<str> + Sync>(formula: &str, texts: &[S]) -> Result<Vec<String>> {
    let formula = Formula::parse(formula)?;
    debug!(
        "mapping {} selections through {:?}",
        texts.len(),
        formula.source()
    );

    let apply = |(i, text): (usize, &S)| formula.apply(coerce_number(text.as_ref()), i);

    #[cfg(feature = "parallel")]
    {
        if texts.len() >= PARALLEL_THRESHOLD {
            return Ok(texts.par_iter().enumerate().map(apply).collect());
        }
    }

    Ok(texts.iter().enumerate().map(apply).collect())
}
