//! Non-preemptive shortest-job-first ordering.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use pagemem::ProcessId;

use crate::process::Process;

/// Order `candidates` by ascending burst. Processes with equal bursts keep the order
/// they were submitted in.
pub fn shortest_job_first<'a, I>(candidates: I) -> VecDeque<ProcessId>
where
    I: IntoIterator<Item = &'a Process>,
{
    let mut ordered: Vec<&Process> = candidates.into_iter().collect();
    // stable, so ties stay in submission order
    ordered.sort_by_key(|p| p.burst());
    ordered.into_iter().map(|p| p.id().clone()).collect()
}

#[cfg(test)]
mod test {
    use super::shortest_job_first;
    use crate::process::ProcessRegistry;

    fn order(jobs: &[(&str, u32)]) -> Vec<String> {
        let mut reg = ProcessRegistry::new();
        for (id, burst) in jobs {
            reg.submit(id, 1, *burst, 4).expect("valid process");
        }
        shortest_job_first(reg.waiting_processes())
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_shortest_burst_first() {
        assert_eq!(order(&[("A", 10), ("B", 3), ("C", 7)]), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_keep_submission_order() {
        assert_eq!(order(&[("A", 5), ("B", 5)]), vec!["A", "B"]);
        assert_eq!(
            order(&[("X", 2), ("A", 5), ("Y", 2), ("B", 1)]),
            vec!["B", "X", "Y", "A"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(order(&[]).is_empty());
    }
}
