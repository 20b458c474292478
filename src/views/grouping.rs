use std::collections::BTreeMap;

use serde::Serialize;

use crate::scheduler::Execution;

/// Executions partitioned by batch id.
///
/// Every record sits in exactly one group and no group is empty.
/// `ordered_ids` lists each group id once, ascending, which is oldest batch
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionGroups<T = Execution> {
    pub groups: BTreeMap<i64, Vec<T>>,
    pub ordered_ids: Vec<i64>,
}

impl<T> Default for ExecutionGroups<T> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            ordered_ids: Vec::new(),
        }
    }
}

impl<T> ExecutionGroups<T> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all groups
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, group: i64) -> Option<&[T]> {
        self.groups.get(&group).map(Vec::as_slice)
    }

    /// The most recent batch
    pub fn latest(&self) -> Option<&[T]> {
        self.ordered_ids.last().and_then(|id| self.get(*id))
    }

    /// Convert every record while keeping group membership and order.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ExecutionGroups<U> {
        ExecutionGroups {
            groups: self
                .groups
                .into_iter()
                .map(|(id, records)| (id, records.into_iter().map(&mut f).collect()))
                .collect(),
            ordered_ids: self.ordered_ids,
        }
    }
}

/// Partition a job's executions by group id, keeping arrival order inside
/// each group.
pub fn group_executions(executions: Vec<Execution>) -> ExecutionGroups {
    let mut groups: BTreeMap<i64, Vec<Execution>> = BTreeMap::new();
    for execution in executions {
        groups.entry(execution.group).or_default().push(execution);
    }
    let ordered_ids = groups.keys().copied().collect();
    ExecutionGroups {
        groups,
        ordered_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(group: i64, node: &str) -> Execution {
        Execution::new("backup", group, true).on_node(node)
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let grouped = group_executions(Vec::new());
        assert!(grouped.is_empty());
        assert!(grouped.ordered_ids.is_empty());
        assert!(grouped.latest().is_none());
    }

    #[test]
    fn ids_are_ascending_and_distinct() {
        let input = vec![exec(9, "a"), exec(2, "b"), exec(9, "c"), exec(-1, "d"), exec(2, "e")];
        let grouped = group_executions(input);
        assert_eq!(grouped.ordered_ids, vec![-1, 2, 9]);
        assert!(grouped.ordered_ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn every_record_lands_in_exactly_one_group() {
        let input: Vec<Execution> = (0..40)
            .map(|i| exec(i % 7, &format!("node-{i}")))
            .collect();
        let grouped = group_executions(input.clone());

        assert_eq!(grouped.len(), input.len());
        for original in &input {
            let hits = grouped
                .groups
                .values()
                .flatten()
                .filter(|e| *e == original)
                .count();
            assert_eq!(hits, 1);
            assert!(grouped.get(original.group).unwrap().contains(original));
        }
        assert!(grouped.groups.values().all(|g| !g.is_empty()));
    }

    #[test]
    fn arrival_order_is_kept_within_a_group() {
        let grouped = group_executions(vec![exec(3, "first"), exec(1, "x"), exec(3, "second")]);
        let nodes: Vec<&str> = grouped
            .get(3)
            .unwrap()
            .iter()
            .map(|e| e.node_name.as_str())
            .collect();
        assert_eq!(nodes, vec!["first", "second"]);
    }

    #[test]
    fn map_preserves_shape() {
        let grouped = group_executions(vec![exec(5, "a"), exec(4, "b"), exec(5, "c")]);
        let names = grouped.map(|e| e.node_name);
        assert_eq!(names.ordered_ids, vec![4, 5]);
        assert_eq!(names.get(5).unwrap(), ["a".to_string(), "c".to_string()]);
        assert_eq!(names.latest().unwrap(), ["a".to_string(), "c".to_string()]);
    }
}
