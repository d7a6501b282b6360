use crate::types::descriptor::ToolDescriptor;
use crate::types::verdict::{AnalysisResult, BatchResult, RiskLevel};

const MITIGATION_STRATEGIES: &[&str] = &[
    "Implement input validation and sanitization",
    "Use principle of least privilege",
    "Enable audit logging for tool usage",
    "Implement rate limiting and access controls",
    "Regular security reviews of MCP tools",
    "Use sandboxing for untrusted tools",
    "Implement behavioral monitoring",
    "Consider static code analysis",
];

fn recommendations(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::High => &[
            "HIGH RISK: Avoid using this tool",
            "Review tool implementation thoroughly",
            "Consider sandboxing or isolation",
            "Perform dynamic analysis if possible",
        ],
        RiskLevel::Medium => &[
            "MEDIUM RISK: Use with caution",
            "Review tool permissions and capabilities",
            "Monitor tool usage and outputs",
            "Test in isolated environment first",
        ],
        RiskLevel::Low => &[
            "LOW RISK: Tool appears safe",
            "Still review tool implementation",
            "Monitor for unexpected behavior",
            "Regular security reviews recommended",
        ],
    }
}

fn push_bullets<'a>(output: &mut String, items: impl IntoIterator<Item = &'a str>) {
    for item in items {
        output.push_str(&format!("- {item}\n"));
    }
}

pub fn to_text(tool: &ToolDescriptor, result: &AnalysisResult) -> String {
    let mut output = String::new();
    output.push_str("MCP Tool Security Analysis\n\n");
    output.push_str("Tool Information:\n");
    output.push_str(&format!(
        "- Name: {}\n- Description: {}\n- Risk Level: {}\n- Risk Score: {}/100\n- Confidence: {}\n\n",
        tool.name, tool.description, result.risk_level, result.risk_score, result.confidence
    ));

    if result.indicators.is_empty() {
        output.push_str("No obvious malicious indicators detected.\n\n");
    } else {
        output.push_str("Malicious Indicators Detected:\n");
        push_bullets(&mut output, result.indicators.iter().map(String::as_str));
        output.push('\n');
    }

    if !result.context_notes.is_empty() {
        output.push_str("Context Analysis:\n");
        push_bullets(&mut output, result.context_notes.iter().map(String::as_str));
        output.push('\n');
    }

    output.push_str("Security Recommendations:\n");
    push_bullets(&mut output, recommendations(result.risk_level).iter().copied());

    output.push_str("\nMitigation Strategies:\n");
    push_bullets(&mut output, MITIGATION_STRATEGIES.iter().copied());

    output.push_str(&format!("\nAnalysis Confidence: {}\n", result.confidence));
    output
}

pub fn batch_to_text(batch: &BatchResult) -> String {
    let mut output = String::new();
    output.push_str("Batch MCP Tool Security Analysis\n\n");
    output.push_str("Summary:\n");
    output.push_str(&format!(
        "- Total tools analyzed: {}\n- High risk tools: {}\n- Medium risk tools: {}\n- Low risk tools: {}\n",
        batch.total, batch.counts.high, batch.counts.medium, batch.counts.low
    ));

    for (level, heading) in [
        (RiskLevel::High, "High Risk Tools"),
        (RiskLevel::Medium, "Medium Risk Tools"),
        (RiskLevel::Low, "Low Risk Tools"),
    ] {
        output.push_str(&format!("\n{heading}:\n"));
        let mut listed = false;
        for entry in batch.at_level(level) {
            output.push_str(&format!(
                "- {} (Score: {}/100)\n",
                entry.name, entry.result.risk_score
            ));
            listed = true;
        }
        if !listed {
            output.push_str("- None detected\n");
        }
    }

    output.push_str("\nRecommendations:\n");
    if batch.counts.high > 0 {
        push_bullets(
            &mut output,
            [
                "Review and potentially remove high-risk tools",
                "Implement additional security controls",
            ],
        );
    }
    if batch.counts.medium > 0 {
        push_bullets(
            &mut output,
            [
                "Monitor medium-risk tools closely",
                "Test in isolated environments",
            ],
        );
    }
    push_bullets(
        &mut output,
        [
            "Implement comprehensive audit logging",
            "Regular security reviews recommended",
        ],
    );

    output
}
