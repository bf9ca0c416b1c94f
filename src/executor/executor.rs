//! Query executor
//!
//! Walks an ordered list of query parts and threads the running value
//! through the operator library.
//!
//! Execution flow:
//! 1. Empty part list returns the source unchanged
//! 2. Validate the source (before any operator runs)
//! 3. Buffer runs of ordering parts; flush each run as one stable sort
//! 4. Dispatch every other part to its operator
//! 5. Return the final running value

use std::mem;

use uuid::Uuid;

use crate::config::ExecutorConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::operators::{self, SortKey};
use crate::query::{QueryPart, Sequence};
use crate::value::Item;

use super::errors::{QueryError, QueryResult};
use super::result::Output;

/// Interprets query parts against a source
#[derive(Debug, Clone, Default)]
pub struct QueryExecutor {
    config: ExecutorConfig,
}

impl QueryExecutor {
    /// Creates a new executor
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Executes `parts` against an array source.
    ///
    /// With no parts the source is returned unchanged. Otherwise a null or
    /// non-array source fails with `InvalidSource` before any operator runs.
    pub fn execute(&self, source: Item, parts: &[QueryPart]) -> QueryResult<Output> {
        if parts.is_empty() {
            return Ok(match &source {
                Item::Array(_) => Output::Sequence(Sequence::from_array(&source)?),
                _ => Output::Value(source),
            });
        }

        let query_id = Uuid::new_v4().to_string();
        match Sequence::from_array(&source) {
            Ok(sequence) => self.execute_tagged(&query_id, sequence, parts),
            Err(e) => Err(self.rejected(&query_id, e, parts.len())),
        }
    }

    /// Executes `parts` against a lazily produced source
    pub fn execute_sequence(&self, source: Sequence, parts: &[QueryPart]) -> QueryResult<Output> {
        self.execute_tagged(&Uuid::new_v4().to_string(), source, parts)
    }

    /// Every log line of one execution carries the same `query_id`
    fn execute_tagged(
        &self,
        query_id: &str,
        source: Sequence,
        parts: &[QueryPart],
    ) -> QueryResult<Output> {
        let count = parts.len().to_string();
        self.emit(
            Event::QueryBegin,
            &[("parts", count.as_str()), ("query_id", query_id)],
        );

        match self.run(query_id, Output::Sequence(source), parts) {
            Ok(output) => {
                let shape = match &output {
                    Output::Sequence(_) => "sequence",
                    Output::Value(_) => "value",
                    Output::Absent => "absent",
                };
                self.emit(
                    Event::QueryComplete,
                    &[
                        ("parts", count.as_str()),
                        ("query_id", query_id),
                        ("result", shape),
                    ],
                );
                Ok(output)
            }
            Err(e) => Err(self.rejected(query_id, e, parts.len())),
        }
    }

    fn run(&self, query_id: &str, mut current: Output, parts: &[QueryPart]) -> QueryResult<Output> {
        let mut pending: Vec<SortKey> = Vec::new();

        for part in parts {
            let kind = part.kind();

            if kind.continues_ordering() {
                pending.push(SortKey::from_part(part)?);
                continue;
            }

            if !pending.is_empty() {
                current = self.flush(query_id, current, mem::take(&mut pending))?;
            }

            if kind.starts_ordering() {
                pending.push(SortKey::from_part(part)?);
                continue;
            }

            if self.config.trace_dispatch {
                self.emit(
                    Event::OperatorDispatch,
                    &[("operator", kind.name()), ("query_id", query_id)],
                );
            }
            current = operators::apply(current, part)?;
        }

        if !pending.is_empty() {
            current = self.flush(query_id, current, pending)?;
        }

        Ok(current)
    }

    /// Sorts the value captured at the start of the ordering run by all of
    /// the run's keys at once
    fn flush(&self, query_id: &str, current: Output, keys: Vec<SortKey>) -> QueryResult<Output> {
        let count = keys.len().to_string();
        self.emit(
            Event::OrderFused,
            &[("keys", count.as_str()), ("query_id", query_id)],
        );
        Ok(Output::Sequence(operators::order(current.into_sequence()?, keys)))
    }

    fn rejected(&self, query_id: &str, error: QueryError, parts: usize) -> QueryError {
        let message = error.to_string();
        let count = parts.to_string();
        self.emit(
            Event::QueryRejected,
            &[
                ("code", error.code()),
                ("message", message.as_str()),
                ("parts", count.as_str()),
                ("query_id", query_id),
            ],
        );
        error
    }

    fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        if self.config.logs(event.severity()) {
            log_event_with_fields(event, fields);
        }
    }
}
