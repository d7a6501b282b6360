use super::{Effect, Matcher, Mitigation, Rule, Target};
use crate::types::verdict::RuleCategory;

const BENIGN_NAME_KEYWORDS: &[&str] = &[
    "calculator",
    "helper",
    "analyzer",
    "validator",
    "checker",
    "formatter",
];

const DESCRIPTION_SAFETY_KEYWORDS: &[&str] = &[
    "safe", "secure", "validate", "sanitize", "check", "verify", "test", "demo",
];

const PARAMETER_SAFETY_KEYWORDS: &[&str] = &["safe", "validate", "check", "test", "demo", "example"];

const NAME_MITIGATION: Option<Mitigation> = Some(Mitigation {
    scope: Target::Name,
    keywords: BENIGN_NAME_KEYWORDS,
});

const DESCRIPTION_MITIGATION: Option<Mitigation> = Some(Mitigation {
    scope: Target::Description,
    keywords: DESCRIPTION_SAFETY_KEYWORDS,
});

const PARAMETER_MITIGATION: Option<Mitigation> = Some(Mitigation {
    scope: Target::ParameterDescription,
    keywords: PARAMETER_SAFETY_KEYWORDS,
});

pub const BUILTIN_RULES: &[Rule] = &[
    // ------------------------------------------------------------------
    // Name patterns
    // ------------------------------------------------------------------
    Rule {
        id: "name.exec",
        category: RuleCategory::NamePattern,
        target: Target::Name,
        matcher: Matcher::Pattern(
            r"(?i)exec|run|system|shell|command|eval|execute|bash|terminal|cmd",
        ),
        weight: 15,
        effect: Effect::Add,
        label: "Command execution capability",
        mitigation: NAME_MITIGATION,
    },
    Rule {
        id: "name.filesystem",
        category: RuleCategory::NamePattern,
        target: Target::Name,
        matcher: Matcher::Pattern(r"(?i)file|path|dir|folder"),
        weight: 10,
        effect: Effect::Add,
        label: "File system access",
        mitigation: NAME_MITIGATION,
    },
    Rule {
        id: "name.network",
        category: RuleCategory::NamePattern,
        target: Target::Name,
        matcher: Matcher::Pattern(r"(?i)net|connect|socket|http|ftp|ssh"),
        weight: 12,
        effect: Effect::Add,
        label: "Network connectivity",
        mitigation: NAME_MITIGATION,
    },
    Rule {
        id: "name.auth",
        category: RuleCategory::NamePattern,
        target: Target::Name,
        matcher: Matcher::Pattern(r"(?i)user|pass|cred|auth|login"),
        weight: 8,
        effect: Effect::Add,
        label: "Authentication/authorization",
        mitigation: NAME_MITIGATION,
    },
    Rule {
        id: "name.privileged",
        category: RuleCategory::NamePattern,
        target: Target::Name,
        matcher: Matcher::Pattern(r"(?i)admin|root|sudo|privilege"),
        weight: 15,
        effect: Effect::Add,
        label: "Privileged operations",
        mitigation: NAME_MITIGATION,
    },
    // ------------------------------------------------------------------
    // Capability keywords
    // ------------------------------------------------------------------
    Rule {
        id: "capability.exec",
        category: RuleCategory::CapabilityKeyword,
        target: Target::Description,
        matcher: Matcher::Keywords(&["execute", "run", "system", "shell", "command"]),
        weight: 20,
        effect: Effect::Add,
        label: "Command execution",
        mitigation: DESCRIPTION_MITIGATION,
    },
    Rule {
        id: "capability.filesystem",
        category: RuleCategory::CapabilityKeyword,
        target: Target::Description,
        matcher: Matcher::Keywords(&[
            "file system",
            "read file",
            "write file",
            "delete",
            "remove",
        ]),
        weight: 15,
        effect: Effect::Add,
        label: "File system access",
        mitigation: DESCRIPTION_MITIGATION,
    },
    Rule {
        id: "capability.network",
        category: RuleCategory::CapabilityKeyword,
        target: Target::Description,
        matcher: Matcher::Keywords(&[
            "network", "connect", "download", "upload", "send", "receive",
        ]),
        weight: 12,
        effect: Effect::Add,
        label: "Network operations",
        mitigation: DESCRIPTION_MITIGATION,
    },
    Rule {
        id: "capability.process",
        category: RuleCategory::CapabilityKeyword,
        target: Target::Description,
        matcher: Matcher::Keywords(&["process", "kill", "terminate", "spawn", "fork"]),
        weight: 18,
        effect: Effect::Add,
        label: "Process management",
        mitigation: DESCRIPTION_MITIGATION,
    },
    Rule {
        id: "capability.environment",
        category: RuleCategory::CapabilityKeyword,
        target: Target::Description,
        matcher: Matcher::Keywords(&["environment", "env", "variable", "config", "settings"]),
        weight: 8,
        effect: Effect::Add,
        label: "Environment access",
        mitigation: DESCRIPTION_MITIGATION,
    },
    Rule {
        id: "capability.credentials",
        category: RuleCategory::CapabilityKeyword,
        target: Target::Description,
        matcher: Matcher::Keywords(&[
            "user",
            "password",
            "credential",
            "token",
            "key",
            "secret",
        ]),
        weight: 15,
        effect: Effect::Add,
        label: "Credential access",
        mitigation: DESCRIPTION_MITIGATION,
    },
    Rule {
        id: "capability.privilege",
        category: RuleCategory::CapabilityKeyword,
        target: Target::Description,
        matcher: Matcher::Keywords(&["admin", "root", "privilege", "elevate", "sudo"]),
        weight: 20,
        effect: Effect::Add,
        label: "Privilege escalation",
        mitigation: DESCRIPTION_MITIGATION,
    },
    Rule {
        id: "capability.shell",
        category: RuleCategory::CapabilityKeyword,
        target: Target::Description,
        matcher: Matcher::Pattern(
            r"(?i)\b(?:execut\w*|run\w*|eval\w*)\s+(?:an?\s+|the\s+|any\s+)?(?:arbitrary\s+)?(?:bash|shell|sh|zsh|powershell|terminal|system)\s+commands?\b",
        ),
        weight: 25,
        effect: Effect::Add,
        label: "Raw shell command execution",
        mitigation: DESCRIPTION_MITIGATION,
    },
    // ------------------------------------------------------------------
    // Input parameters
    // ------------------------------------------------------------------
    Rule {
        id: "parameter.code",
        category: RuleCategory::ParameterPattern,
        target: Target::ParameterName,
        matcher: Matcher::Pattern(r"(?i)command|cmd|script|code|expression"),
        weight: 25,
        effect: Effect::Add,
        label: "Code execution",
        mitigation: PARAMETER_MITIGATION,
    },
    Rule {
        id: "parameter.resource",
        category: RuleCategory::ParameterPattern,
        target: Target::ParameterName,
        matcher: Matcher::Pattern(r"(?i)file|path|url|address"),
        weight: 15,
        effect: Effect::Add,
        label: "File/URL access",
        mitigation: PARAMETER_MITIGATION,
    },
    Rule {
        id: "parameter.credential",
        category: RuleCategory::ParameterPattern,
        target: Target::ParameterName,
        matcher: Matcher::Pattern(r"(?i)user|password|credential|token|key"),
        weight: 20,
        effect: Effect::Add,
        label: "Credential input",
        mitigation: PARAMETER_MITIGATION,
    },
    Rule {
        id: "parameter.system",
        category: RuleCategory::ParameterPattern,
        target: Target::ParameterName,
        matcher: Matcher::Pattern(r"(?i)system|env|variable|config"),
        weight: 10,
        effect: Effect::Add,
        label: "System configuration",
        mitigation: PARAMETER_MITIGATION,
    },
    // ------------------------------------------------------------------
    // Behavioral patterns (never mitigated)
    // ------------------------------------------------------------------
    Rule {
        id: "behavior.poisoning",
        category: RuleCategory::BehavioralPattern,
        target: Target::FullText,
        matcher: Matcher::Pattern(
            r"(?i)tool.*poisoning|framework.*injection|context.*injection",
        ),
        weight: 30,
        effect: Effect::Add,
        label: "Tool poisoning indicators",
        mitigation: None,
    },
    Rule {
        id: "behavior.covert",
        category: RuleCategory::BehavioralPattern,
        target: Target::FullText,
        matcher: Matcher::Pattern(r"(?i)covert|hidden|secret|stealth"),
        weight: 25,
        effect: Effect::Add,
        label: "Covert operation indicators",
        mitigation: None,
    },
    Rule {
        id: "behavior.bypass",
        category: RuleCategory::BehavioralPattern,
        target: Target::FullText,
        matcher: Matcher::Pattern(r"(?i)bypass|override|ignore.*safety"),
        weight: 30,
        effect: Effect::Add,
        label: "Safety bypass indicators",
        mitigation: None,
    },
    // ------------------------------------------------------------------
    // Context adjustment
    // ------------------------------------------------------------------
    Rule {
        id: "context.suspicious",
        category: RuleCategory::ContextAdjustment,
        target: Target::NameOrDescription,
        matcher: Matcher::Keywords(&[
            "executor", "runner", "launcher", "injector", "bypass", "override",
        ]),
        weight: 15,
        effect: Effect::Add,
        label: "Suspicious context",
        mitigation: None,
    },
    Rule {
        id: "context.legitimate",
        category: RuleCategory::ContextAdjustment,
        target: Target::NameOrDescription,
        matcher: Matcher::Keywords(&[
            "calculator",
            "helper",
            "analyzer",
            "validator",
            "formatter",
            "converter",
            "generator",
        ]),
        weight: 0,
        effect: Effect::Reduce,
        label: "Legitimate context",
        mitigation: None,
    },
];
