//! Integration Test: Layering Enforcement
//!
//! The core crate is headless orchestration and must stay presentation-free:
//! no terminal, rendering, or clipboard crates may leak into it. The whole
//! workspace must also stay on the async HTTP client.
//!
//! **Policy**: `core/src` MUST NOT reference ratatui, crossterm, or arboard.
//! **Policy**: No production code may use `reqwest::blocking`.

use std::fs;
use std::path::{Path, PathBuf};

/// Crates that belong to the terminal surface, forbidden in core.
const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm", "arboard"];

/// Test that the core crate has no terminal-surface dependencies
#[test]
fn test_core_is_presentation_free() {
    let mut violations = Vec::new();

    for (path, content) in read_sources("core/src") {
        for (idx, line) in content.lines().enumerate() {
            let code_part = line.split("//").next().unwrap_or(line);
            for krate in SURFACE_CRATES {
                if code_part.contains(krate) {
                    violations.push(format!(
                        "{}:{} - surface crate `{}` referenced in core: {}",
                        path.display(),
                        idx + 1,
                        krate,
                        line.trim()
                    ));
                }
            }
        }
    }

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "\nFound {} layering violation(s): core must not reference \
             terminal-surface crates.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Test that no production code uses the blocking HTTP client
#[test]
fn test_no_blocking_http_client() {
    let mut violations = Vec::new();

    for dir in ["core/src", "tui/src"] {
        for (path, content) in read_sources(dir) {
            for (idx, line) in content.lines().enumerate() {
                let code_part = line.split("//").next().unwrap_or(line);
                if code_part.contains("reqwest::blocking") {
                    violations.push(format!(
                        "{}:{} - blocking HTTP client: {}",
                        path.display(),
                        idx + 1,
                        line.trim()
                    ));
                }
            }
        }
    }

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "\nFound {} blocking HTTP violation(s).\nUse the async reqwest client.",
            violations.len()
        );
    }
}

/// Read every Rust source file under a workspace-relative directory.
fn read_sources(dir: &str) -> Vec<(PathBuf, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let path = root.join(dir);
    assert!(
        path.exists(),
        "expected workspace directory {dir} to exist"
    );

    let mut sources = Vec::new();
    for entry in walkdir::WalkDir::new(&path)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
            if let Ok(content) = fs::read_to_string(entry.path()) {
                sources.push((entry.path().to_path_buf(), content));
            }
        }
    }
    sources
}
