use regex::Regex;
use std::sync::OnceLock;

// Known license families, checked in order. MPL, EPL and CDDL come before
// the GNU families since their texts name GNU licenses as secondary
// licenses. LGPL precedes GPL (LGPL texts quote the GPL by version) and
// BSD-3 precedes BSD-2.
const SIGNATURES: [(&str, &str); 11] = [
    (
        "MIT",
        r"\bMIT\b|(?i:permission\s+is\s+hereby\s+granted,\s+free\s+of\s+charge)",
    ),
    (
        "Apache-2.0",
        r"(?i)\bapache(\s+license)?,?[\s-]*(version|v)?\s*2(\.0)?\b",
    ),
    (
        "MPL-2.0",
        r"(?i)\bmozilla\s+public\s+license,?\s*(version|v)?\s*2\.0|\bMPL[\s-]*v?2(\.0)?\b",
    ),
    (
        "EPL-2.0",
        r"(?i)\beclipse\s+public\s+license\s*[-,]?\s*(version|v)?\s*2\.0|\bEPL[\s-]*v?2(\.0)?\b",
    ),
    (
        "CDDL-1.0",
        r"(?i)\bcommon\s+development\s+and\s+distribution\s+license|\bCDDL\b",
    ),
    (
        "LGPL-2.1",
        r"(?i)\bGNU\s+LESSER\s+GENERAL\s+PUBLIC\s+LICENSE\s*,?\s*(version|v)?\s*2\.1|\bLGPL[\s-]*(v|version)?\s*2\.1",
    ),
    (
        "LGPL-3.0",
        r"(?i)\bGNU\s+LESSER\s+GENERAL\s+PUBLIC\s+LICENSE\s*,?\s*(version|v)?\s*3\b|\bLGPL[\s-]*(v|version)?\s*3(\.0)?\b",
    ),
    (
        "GPL-2.0",
        r"(?i)\bGNU\s+GENERAL\s+PUBLIC\s+LICENSE\s*,?\s*(version|v)?\s*2\b|\bGPL[\s-]*(v|version)?\s*2(\.0)?\b",
    ),
    (
        "GPL-3.0",
        r"(?i)\bGNU\s+GENERAL\s+PUBLIC\s+LICENSE\s*,?\s*(version|v)?\s*3\b|\bGPL[\s-]*(v|version)?\s*3(\.0)?\b",
    ),
    (
        "BSD-3-Clause",
        r"(?i)neither\s+the\s+name\s+of|\bBSD[\s-]*3[\s-]*clause|\b(new|modified|revised)\s+BSD\b",
    ),
    (
        "BSD-2-Clause",
        r"(?i)\bBSD[\s-]*2[\s-]*clause|\bsimplified\s+BSD\b|\bFreeBSD\s+license|redistribution\s+and\s+use\s+in\s+source\s+and\s+binary\s+forms",
    ),
];

static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

fn patterns() -> &'static [(&'static str, Regex)] {
    PATTERNS.get_or_init(|| {
        SIGNATURES
            .iter()
            .map(|(name, pattern)| (*name, Regex::new(pattern).expect("valid regex")))
            .collect()
    })
}

pub fn classify(text: &str) -> Option<&'static str> {
    patterns()
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(name, _)| *name)
}
