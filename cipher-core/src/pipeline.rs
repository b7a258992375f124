// File:    pipeline.rs
// Author:  apezoo
// Date:    2025-08-03
//
// Description: The five-stage processing pipeline every cipher configures.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The shared processing pipeline.
//!
//! A run goes through five stages:
//!
//! 1. raw preprocessing of the whole input text,
//! 2. grouping into fixed-width chunks or one whole-input group,
//! 3. per-group preprocessing,
//! 4. the cipher's transform, applied to each group,
//! 5. per-group postprocessing, then consolidation into the output text.
//!
//! Stages are pure functions; the first one that fails aborts the run.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use log::debug;

use crate::alphabet::Symbol;
use crate::error::{CipherError, Result};

/// A group value as it travels between stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A run of characters.
    Text(String),
    /// A single encoded character.
    Symbol(Symbol),
    /// A sequence of encoded characters.
    Symbols(Vec<Symbol>),
    /// A numeric block.
    Number(u64),
}

impl Value {
    /// Short name of the value's shape, used in error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Symbol(_) => "symbol",
            Self::Symbols(_) => "symbol sequence",
            Self::Number(_) => "number",
        }
    }

    /// Unwraps a text group.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::GroupShape`] for any other shape.
    pub fn into_text(self, step: &'static str) -> Result<String> {
        match self {
            Self::Text(s) => Ok(s),
            other => Err(other.mismatch(step, "text")),
        }
    }

    /// Unwraps a single symbol.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::GroupShape`] for any other shape.
    pub fn into_symbol(self, step: &'static str) -> Result<Symbol> {
        match self {
            Self::Symbol(s) => Ok(s),
            other => Err(other.mismatch(step, "symbol")),
        }
    }

    /// Unwraps a symbol sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::GroupShape`] for any other shape.
    pub fn into_symbols(self, step: &'static str) -> Result<Vec<Symbol>> {
        match self {
            Self::Symbols(s) => Ok(s),
            other => Err(other.mismatch(step, "symbol sequence")),
        }
    }

    /// Unwraps a numeric block.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::GroupShape`] for any other shape.
    pub fn into_number(self, step: &'static str) -> Result<u64> {
        match self {
            Self::Number(n) => Ok(n),
            other => Err(other.mismatch(step, "number")),
        }
    }

    const fn mismatch(&self, step: &'static str, expected: &'static str) -> CipherError {
        CipherError::GroupShape {
            step,
            expected,
            found: self.shape(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Symbols(symbols) => symbols.iter().try_for_each(|s| write!(f, "{s}")),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

type TextFn = Arc<dyn Fn(&str) -> Result<String> + Send + Sync>;
type GroupFn = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// A named transform applied to the whole input before grouping.
#[derive(Clone)]
pub struct TextStep {
    name: &'static str,
    apply: TextFn,
}

impl TextStep {
    /// Wraps `apply` under `name`, the label shown in diagnostic tables.
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    /// The step's label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the step.
    ///
    /// # Errors
    ///
    /// Propagates whatever the wrapped function returns.
    pub fn apply(&self, text: &str) -> Result<String> {
        (self.apply)(text)
    }
}

impl fmt::Debug for TextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextStep").field(&self.name).finish()
    }
}

/// A named transform applied to every group.
#[derive(Clone)]
pub struct GroupStep {
    name: &'static str,
    apply: GroupFn,
}

impl GroupStep {
    /// Wraps `apply` under `name`, the label shown in diagnostic tables.
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    /// The step's label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the step on one group.
    ///
    /// # Errors
    ///
    /// Propagates whatever the wrapped function returns.
    pub fn apply(&self, group: Value) -> Result<Value> {
        (self.apply)(group)
    }
}

impl fmt::Debug for GroupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GroupStep").field(&self.name).finish()
    }
}

/// How raw-preprocessed text is split into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Consecutive chunks of this many characters; the last may be shorter.
    Fixed(NonZeroUsize),
    /// The whole text forms a single group.
    Whole,
}

impl Grouping {
    /// Splits `text` into text groups. Empty input yields no groups.
    #[must_use]
    pub fn split(self, text: &str) -> Vec<Value> {
        if text.is_empty() {
            return Vec::new();
        }
        match self {
            Self::Whole => vec![Value::Text(text.to_owned())],
            Self::Fixed(size) => {
                let chars: Vec<char> = text.chars().collect();
                chars
                    .chunks(size.get())
                    .map(|chunk| Value::Text(chunk.iter().collect()))
                    .collect()
            }
        }
    }
}

/// Reduces the post-processed groups to the final output.
pub type Consolidator = fn(Vec<Value>) -> String;

/// Default consolidator: concatenates every group's textual form.
#[must_use]
pub fn concatenate(groups: Vec<Value>) -> String {
    groups.iter().map(ToString::to_string).collect()
}

/// One named row of a diagnostic trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Label of the stage that produced the row.
    pub name: String,
    /// The values the stage produced, one per cell.
    pub cells: Vec<Value>,
}

impl Row {
    /// A row holding one value.
    #[must_use]
    pub fn scalar(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            cells: vec![value],
        }
    }

    /// A row holding one cell per group; symbol sequences are flattened so
    /// each symbol gets its own cell.
    #[must_use]
    pub fn groups(name: impl Into<String>, groups: &[Value]) -> Self {
        let cells = groups
            .iter()
            .flat_map(|group| match group {
                Value::Symbols(symbols) => {
                    symbols.iter().copied().map(Value::Symbol).collect::<Vec<_>>()
                }
                other => vec![other.clone()],
            })
            .collect();
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// The stage configuration of one cipher instance.
#[derive(Debug, Clone)]
pub struct Pipeline {
    raw: Vec<TextStep>,
    grouping: Grouping,
    pre: Vec<GroupStep>,
    post: Vec<GroupStep>,
    consolidator: Consolidator,
}

impl Pipeline {
    /// An empty pipeline with the given grouping and plain concatenation.
    #[must_use]
    pub fn new(grouping: Grouping) -> Self {
        Self {
            raw: Vec::new(),
            grouping,
            pre: Vec::new(),
            post: Vec::new(),
            consolidator: concatenate,
        }
    }

    /// Appends a raw preprocessing step.
    #[must_use]
    pub fn raw(mut self, step: TextStep) -> Self {
        self.raw.push(step);
        self
    }

    /// Appends a per-group preprocessing step.
    #[must_use]
    pub fn pre(mut self, step: GroupStep) -> Self {
        self.pre.push(step);
        self
    }

    /// Appends a per-group postprocessing step.
    #[must_use]
    pub fn post(mut self, step: GroupStep) -> Self {
        self.post.push(step);
        self
    }

    /// Replaces the consolidator.
    #[must_use]
    pub fn consolidate_with(mut self, consolidator: Consolidator) -> Self {
        self.consolidator = consolidator;
        self
    }

    /// The grouping policy.
    #[must_use]
    pub const fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// The raw preprocessing steps, in order.
    #[must_use]
    pub fn raw_steps(&self) -> &[TextStep] {
        &self.raw
    }

    /// The per-group preprocessing steps, in order.
    #[must_use]
    pub fn pre_steps(&self) -> &[GroupStep] {
        &self.pre
    }

    /// The per-group postprocessing steps, in order.
    #[must_use]
    pub fn post_steps(&self) -> &[GroupStep] {
        &self.post
    }

    /// Runs only the raw preprocessing steps.
    ///
    /// # Errors
    ///
    /// Returns the first step failure.
    pub fn preprocess(&self, input: &str, mut trace: Option<&mut Tracer>) -> Result<String> {
        let mut text = input.to_owned();
        for step in &self.raw {
            text = step.apply(&text)?;
            if let Some(tracer) = trace.as_deref_mut() {
                tracer.step(Row::scalar(step.name(), Value::Text(text.clone())));
            }
        }
        Ok(text)
    }

    /// Runs every stage over `input`, using `transform` as stage four.
    ///
    /// When `trace` is given, each stage appends its row to it.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any stage; nothing is retried.
    pub fn run<T>(&self, input: &str, transform: T, mut trace: Option<&mut Tracer>) -> Result<String>
    where
        T: Fn(Value) -> Result<Value>,
    {
        let text = self.preprocess(input, trace.as_deref_mut())?;
        let mut groups = self.grouping.split(&text);
        debug!("pipeline split {} chars into {} group(s)", text.chars().count(), groups.len());
        if let Some(tracer) = trace.as_deref_mut() {
            tracer.step(Row::groups("group", &groups));
        }

        groups = apply_all(&self.pre, groups, trace.as_deref_mut())?;

        groups = groups.into_iter().map(&transform).collect::<Result<_>>()?;
        if let Some(tracer) = trace.as_deref_mut() {
            let label = tracer.transform_label;
            tracer.always(Row::groups(label, &groups));
        }

        groups = apply_all(&self.post, groups, trace)?;

        Ok((self.consolidator)(groups))
    }
}

fn apply_all(steps: &[GroupStep], mut groups: Vec<Value>, mut trace: Option<&mut Tracer>) -> Result<Vec<Value>> {
    for step in steps {
        groups = groups
            .into_iter()
            .map(|group| step.apply(group))
            .collect::<Result<_>>()?;
        if let Some(tracer) = trace.as_deref_mut() {
            tracer.step(Row::groups(step.name(), &groups));
        }
    }
    Ok(groups)
}

/// Collects the rows of a diagnostic run.
#[derive(Debug)]
pub struct Tracer {
    rows: Vec<Row>,
    show_steps: bool,
    transform_label: &'static str,
}

impl Tracer {
    /// A tracer that labels the transform row `transform_label` and records
    /// intermediate steps only when `show_steps` is set.
    #[must_use]
    pub const fn new(show_steps: bool, transform_label: &'static str) -> Self {
        Self {
            rows: Vec::new(),
            show_steps,
            transform_label,
        }
    }

    /// Whether intermediate steps are recorded.
    #[must_use]
    pub const fn show_steps(&self) -> bool {
        self.show_steps
    }

    /// Records a row unconditionally.
    pub fn always(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Records an intermediate row.
    pub fn step(&mut self, row: Row) {
        if self.show_steps {
            self.rows.push(row);
        }
    }

    /// Consumes the tracer, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
