use super::Analyzer;
use crate::error::{AnalyzerError, Result};
use crate::types::descriptor::ToolDescriptor;
use crate::types::verdict::{BatchEntry, BatchResult, LevelCounts, RiskLevel};

impl Analyzer {
    pub fn analyze_batch(&self, descriptors: &[ToolDescriptor]) -> Result<BatchResult> {
        if descriptors.is_empty() {
            return Err(AnalyzerError::EmptyBatch);
        }

        let mut entries: Vec<BatchEntry> = descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| BatchEntry {
                index,
                name: descriptor.name.clone(),
                result: self.analyze_descriptor(descriptor),
            })
            .collect();

        // `sort_by` is stable; the index tie-break keeps that true even if
        // entries are ever produced out of order.
        entries.sort_by(|a, b| {
            b.result
                .risk_score
                .cmp(&a.result.risk_score)
                .then(a.index.cmp(&b.index))
        });

        let mut counts = LevelCounts::default();
        for entry in &entries {
            match entry.result.risk_level {
                RiskLevel::High => counts.high += 1,
                RiskLevel::Medium => counts.medium += 1,
                RiskLevel::Low => counts.low += 1,
            }
        }

        tracing::info!(
            total = entries.len(),
            high = counts.high,
            medium = counts.medium,
            low = counts.low,
            "batch analyzed"
        );

        Ok(BatchResult {
            total: entries.len(),
            counts,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str, description: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, description, None)
    }

    #[test]
    fn empty_batch_is_rejected() {
        let analyzer = Analyzer::builtin().expect("analyzer should build");
        assert!(matches!(
            analyzer.analyze_batch(&[]),
            Err(AnalyzerError::EmptyBatch)
        ));
    }

    #[test]
    fn entries_sorted_by_score_with_stable_ties() {
        let analyzer = Analyzer::builtin().expect("analyzer should build");
        let tools = vec![
            tool("hello", "Returns a greeting"),
            tool("run_bash", "Execute a bash command and return its output"),
            tool("echo", "Repeats a message"),
            tool("fetcher", "Downloads a web page"),
            tool("ping_tool", "Replies with pong"),
        ];

        let batch = analyzer.analyze_batch(&tools).expect("batch should succeed");
        let order: Vec<_> = batch.entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(order, vec!["run_bash", "fetcher", "hello", "echo", "ping_tool"]);
        assert!(batch
            .entries
            .windows(2)
            .all(|pair| pair[0].result.risk_score >= pair[1].result.risk_score));
        assert_eq!(batch.total, 5);
        assert_eq!(
            batch.counts,
            LevelCounts {
                high: 1,
                medium: 0,
                low: 4
            }
        );
        assert_eq!(batch.highest_level(), Some(RiskLevel::High));
    }

    #[test]
    fn entries_remember_input_position() {
        let analyzer = Analyzer::builtin().expect("analyzer should build");
        let tools = vec![
            tool("a", "Plain"),
            tool("b", "Kill a process as root"),
        ];

        let batch = analyzer.analyze_batch(&tools).expect("batch should succeed");
        assert_eq!(batch.entries[0].index, 1);
        assert_eq!(batch.entries[1].index, 0);
        assert_eq!(batch.at_level(RiskLevel::Medium).count(), 1);
    }

    #[test]
    fn batch_results_match_individual_analysis() {
        let analyzer = Analyzer::builtin().expect("analyzer should build");
        let tools = vec![
            tool("net_exec", "Download and run a script"),
            tool("calculator", "Adds numbers"),
        ];

        let batch = analyzer.analyze_batch(&tools).expect("batch should succeed");
        for entry in &batch.entries {
            let single = analyzer.analyze_descriptor(&tools[entry.index]);
            assert_eq!(entry.result, single);
        }
    }
}
