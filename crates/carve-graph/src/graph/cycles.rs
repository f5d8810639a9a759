//! Cycle detection with Tarjan's strongly connected components.

use super::ModuleGraph;
use crate::module::ModuleId;

const UNVISITED: usize = usize::MAX;

impl ModuleGraph {
    /// Import cycles in the graph.
    ///
    /// Each cycle is a strongly connected component with more than one module,
    /// or a module that imports itself. Members are sorted by id and cycles
    /// are sorted by their first member.
    pub fn find_cycles(&self) -> Vec<Vec<ModuleId>> {
        let adjacency: Vec<Vec<usize>> = self
            .modules()
            .map(|node| {
                self.dependencies(node.id)
                    .into_iter()
                    .map(ModuleId::index)
                    .collect()
            })
            .collect();

        let count = adjacency.len();
        let mut index = vec![UNVISITED; count];
        let mut low = vec![0; count];
        let mut on_stack = vec![false; count];
        let mut stack = Vec::new();
        let mut next_index = 0;
        let mut cycles = Vec::new();

        for start in 0..count {
            if index[start] != UNVISITED {
                continue;
            }

            // (node, next child position)
            let mut work = vec![(start, 0usize)];
            while let Some(frame) = work.last_mut() {
                let (v, child) = *frame;
                if child == 0 && index[v] == UNVISITED {
                    index[v] = next_index;
                    low[v] = next_index;
                    next_index += 1;
                    stack.push(v);
                    on_stack[v] = true;
                }

                if let Some(&w) = adjacency[v].get(child) {
                    frame.1 += 1;
                    if index[w] == UNVISITED {
                        work.push((w, 0));
                    } else if on_stack[w] {
                        low[v] = low[v].min(index[w]);
                    }
                    continue;
                }

                work.pop();
                if let Some(&(parent, _)) = work.last() {
                    low[parent] = low[parent].min(low[v]);
                }

                if low[v] == index[v] {
                    let mut component = Vec::new();
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        component.push(w);
                        if w == v {
                            break;
                        }
                    }
                    if component.len() > 1 || adjacency[v].contains(&v) {
                        component.sort_unstable();
                        cycles.push(component.into_iter().map(ModuleId::from_index).collect());
                    }
                }
            }
        }

        cycles.sort_by_key(|cycle: &Vec<ModuleId>| cycle.first().copied());
        cycles
    }
}
