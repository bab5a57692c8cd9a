use std::iter;

use rustc_hash::{FxHashMap, FxHashSet};

use vetro_common::ModuleIdx;

use super::ChunkStage;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
enum Status {
  ToBeExecuted(ModuleIdx),
  WaitForExit(ModuleIdx),
}

impl ChunkStage<'_> {
  /// Assigns every module its execution order with a cycle-tolerant
  /// post-order walk. Circular imports are legal in a module graph; they
  /// terminate here and only produce a warning.
  pub(super) fn sort_modules(&mut self) {
    let mut execution_stack = self
      .scan_output
      .entry_points
      .iter()
      .rev()
      .map(|entry| Status::ToBeExecuted(entry.idx))
      .collect::<Vec<_>>();

    let module_table = &mut self.scan_output.module_table;

    let mut executed_ids = FxHashSet::default();
    executed_ids.reserve(module_table.len());
    let mut stack_indexes_of_executing_id = FxHashMap::default();

    let mut next_exec_order = 0;
    let mut circular_dependencies = FxHashSet::default();

    while let Some(status) = execution_stack.pop() {
      match status {
        Status::ToBeExecuted(idx) => {
          if executed_ids.contains(&idx) {
            // Try to check if there is a circular dependency
            if let Some(index) = stack_indexes_of_executing_id.get(&idx).copied() {
              // Executing
              let cycles = execution_stack[index..]
                .iter()
                .filter_map(|action| match action {
                  // Only modules with `Status::WaitForExit` are on the execution chain
                  Status::ToBeExecuted(_) => None,
                  Status::WaitForExit(id) => Some(*id),
                })
                .chain(iter::once(idx))
                .collect::<Box<[_]>>();
              circular_dependencies.insert(cycles);
            }
          } else {
            executed_ids.insert(idx);
            execution_stack.push(Status::WaitForExit(idx));
            stack_indexes_of_executing_id.insert(idx, execution_stack.len() - 1);

            execution_stack.extend(
              module_table[idx]
                .import_records()
                .iter()
                .filter(|rec| rec.kind.is_static())
                .map(|rec| rec.resolved_module())
                .rev()
                .map(Status::ToBeExecuted),
            );
          }
        }
        Status::WaitForExit(idx) => {
          module_table[idx].set_exec_order(next_exec_order);
          next_exec_order += 1;
          stack_indexes_of_executing_id.remove(&idx);
        }
      }
    }

    // Dynamic imports start their own execution chains.
    let dynamic_roots = module_table
      .modules
      .iter()
      .flat_map(|module| {
        module
          .import_records()
          .iter()
          .filter(|rec| !rec.kind.is_static())
          .map(|rec| rec.resolved_module())
          .collect::<Vec<_>>()
      })
      .collect::<Vec<_>>();

    for root in dynamic_roots {
      if !executed_ids.contains(&root) {
        let mut stack = vec![Status::ToBeExecuted(root)];
        while let Some(status) = stack.pop() {
          match status {
            Status::ToBeExecuted(idx) => {
              if !executed_ids.contains(&idx) {
                executed_ids.insert(idx);
                stack.push(Status::WaitForExit(idx));
                stack.extend(
                  module_table[idx]
                    .import_records()
                    .iter()
                    .filter(|rec| rec.kind.is_static())
                    .map(|rec| rec.resolved_module())
                    .rev()
                    .map(Status::ToBeExecuted),
                );
              }
            }
            Status::WaitForExit(idx) => {
              module_table[idx].set_exec_order(next_exec_order);
              next_exec_order += 1;
            }
          }
        }
      }
    }

    if !circular_dependencies.is_empty() {
      for cycle in circular_dependencies {
        let paths = cycle
          .iter()
          .copied()
          .filter_map(|idx| module_table[idx].as_normal())
          .map(|module| module.stable_id.clone())
          .collect::<Vec<_>>();

        self
          .scan_output
          .warnings
          .push(anyhow::anyhow!("Circular dependency: {}.", paths.join(" -> ")));
      }
    }
  }
}
