//! Multiworld Headless Validation Harness
//!
//! Validates spec parsing, generation, and solvability without any
//! networking, storage, or rendering. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p multiworld-simtest
//!   cargo run -p multiworld-simtest -- --verbose

use std::time::Instant;

use multiworld_core::entities::MultiWorld;
use multiworld_core::generate::{generate, GenerationConfig, GenerationError};
use multiworld_core::verify::verify_assignment;
use multiworld_logic::{validate_spec, MultiWorldSpec};

// ── Sample spec (same JSON a front end would submit) ────────────────────
const SAMPLE_JSON: &str = include_str!("../../../data/sample_multiworld.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Multiworld Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Sample spec parsing + static validation
    results.extend(validate_sample_spec(verbose));

    // 2. Seeded generation sweep over the sample spec
    results.extend(validate_generation_sweep(verbose));

    // 3. Expected failure surfaces
    results.extend(validate_failure_modes(verbose));

    // 4. Large-pool stress run
    results.extend(validate_stress(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Sample spec ──────────────────────────────────────────────────────

fn validate_sample_spec(verbose: bool) -> Vec<TestResult> {
    println!("--- Sample Spec ---");
    let mut results = Vec::new();

    let spec: MultiWorldSpec = match serde_json::from_str(SAMPLE_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "sample_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "sample_parse".into(),
        passed: true,
        detail: format!("{} players loaded", spec.players.len()),
    });

    let issues = validate_spec(&spec);
    results.push(TestResult {
        name: "sample_static_validation".into(),
        passed: issues.is_empty(),
        detail: if issues.is_empty() {
            "no issues".into()
        } else {
            issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let multi = MultiWorld::from_spec(&spec);
    results.push(TestResult {
        name: "sample_entity_graph".into(),
        passed: multi.players().len() == 2 && !multi.items().is_empty(),
        detail: format!(
            "{} players, {} items, {} tasks",
            multi.players().len(),
            multi.items().len(),
            multi.tasks().len()
        ),
    });

    if verbose {
        println!("  parsed multiworld \"{}\"", spec.name);
    }

    results
}

// ── 2. Generation sweep ─────────────────────────────────────────────────

fn validate_generation_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Generation Sweep ---");
    let mut results = Vec::new();

    let spec: MultiWorldSpec = match serde_json::from_str(SAMPLE_JSON) {
        Ok(s) => s,
        Err(_) => return results,
    };

    let mut failures = Vec::new();
    let seed_count: u64 = 100;
    for seed in 0..seed_count {
        let mut multi = MultiWorld::from_spec(&spec);
        match generate(&mut multi, &GenerationConfig { seed: Some(seed) }) {
            Ok(report) => {
                if let Err(e) = verify_assignment(&multi) {
                    failures.push(format!("seed {}: replay failed: {}", seed, e));
                } else if report
                    .players
                    .iter()
                    .any(|p| p.victory_reachable == Some(false))
                {
                    failures.push(format!("seed {}: victory unreachable", seed));
                }
            }
            Err(e) => failures.push(format!("seed {}: {}", seed, e)),
        }
    }

    results.push(TestResult {
        name: "sweep_solvable".into(),
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            format!("{} seeds generated, replayed, victory reachable", seed_count)
        } else {
            failures.join("; ")
        },
    });

    // Determinism: one seed, two runs, identical reports.
    let run = |seed| {
        let mut multi = MultiWorld::from_spec(&spec);
        generate(&mut multi, &GenerationConfig { seed: Some(seed) })
            .map(|r| serde_json::to_string(&r).unwrap_or_default())
    };
    let deterministic = matches!((run(7), run(7)), (Ok(a), Ok(b)) if a == b);
    results.push(TestResult {
        name: "sweep_deterministic".into(),
        passed: deterministic,
        detail: "same seed reproduces the same report".into(),
    });

    if verbose {
        let mut multi = MultiWorld::from_spec(&spec);
        if let Ok(report) = generate(&mut multi, &GenerationConfig { seed: Some(7) }) {
            println!("{}", report.render_text());
        }
    }

    results
}

// ── 3. Failure surfaces ─────────────────────────────────────────────────

fn validate_failure_modes(_verbose: bool) -> Vec<TestResult> {
    println!("--- Failure Surfaces ---");
    let mut results = Vec::new();

    // Starting selector requesting more than exists.
    let overdraw: MultiWorldSpec = serde_json::from_str(
        r#"{
            "name": "overdraw",
            "players": {"P": {"world": {
                "name": "W",
                "startingItems": [{"tag": "Songs", "count": 2}],
                "items": {"Only Song": {"tags": ["Songs"]}, "Key": {}},
                "tasks": {"T": {}}
            }}}
        }"#,
    )
    .expect("static test spec");
    let mut multi = MultiWorld::from_spec(&overdraw);
    let got_spec_error = matches!(
        generate(&mut multi, &GenerationConfig { seed: Some(1) }),
        Err(GenerationError::Specification { .. })
    );
    results.push(TestResult {
        name: "selector_overdraw_fatal".into(),
        passed: got_spec_error,
        detail: "unsatisfiable starting selector raises a specification error".into(),
    });

    // Requirement that can never be met: the only task needs more items
    // than exist in total.
    let impossible: MultiWorldSpec = serde_json::from_str(
        r#"{
            "name": "impossible",
            "players": {"P": {"world": {
                "name": "W",
                "items": {"Key": {"count": 3}},
                "tasks": {"Door": {"needs": {"item": "Key", "amount": 5}}}
            }}}
        }"#,
    )
    .expect("static test spec");
    let mut multi = MultiWorld::from_spec(&impossible);
    let got_unsolvable = matches!(
        generate(&mut multi, &GenerationConfig { seed: Some(1) }),
        Err(GenerationError::UnsolvableWorld { .. })
    );
    results.push(TestResult {
        name: "impossible_world_fatal".into(),
        passed: got_unsolvable,
        detail: "unmeetable requirement raises an unsolvable-world error".into(),
    });

    results
}

// ── 4. Stress ───────────────────────────────────────────────────────────

fn validate_stress(verbose: bool) -> Vec<TestResult> {
    println!("--- Stress ---");
    let mut results = Vec::new();

    // 1500 filler items, 80 ungated tasks, a 20-deep requirement chain.
    let mut items = String::from(r#""Coin": {"count": 1500}"#);
    let mut tasks = String::new();
    for i in 0..80 {
        if i > 0 {
            tasks.push(',');
        }
        tasks.push_str(&format!(r#""Free{}": {{}}"#, i));
    }
    for i in 0..20 {
        items.push_str(&format!(r#", "Key{}": {{}}"#, i));
        if i > 0 {
            tasks.push_str(&format!(
                r#", "Gate{}": {{"needs": {{"item": "Key{}"}}}}"#,
                i,
                i - 1
            ));
        }
    }
    let json = format!(
        r#"{{
            "name": "stress",
            "players": {{"P": {{"world": {{
                "name": "Stress World",
                "items": {{{}}},
                "tasks": {{{}}}
            }}}}}}
        }}"#,
        items, tasks
    );
    let spec: MultiWorldSpec = serde_json::from_str(&json).expect("static test spec");

    let started = Instant::now();
    let mut multi = MultiWorld::from_spec(&spec);
    let outcome = generate(&mut multi, &GenerationConfig { seed: Some(2024) });
    let elapsed = started.elapsed();

    match outcome {
        Ok(_) => {
            let replay_ok = verify_assignment(&multi).is_ok();
            results.push(TestResult {
                name: "stress_1500_items".into(),
                passed: replay_ok,
                detail: format!(
                    "{} items placed and replayed in {:.2?}",
                    multi.items().len(),
                    elapsed
                ),
            });
        }
        Err(e) => results.push(TestResult {
            name: "stress_1500_items".into(),
            passed: false,
            detail: format!("generation failed: {}", e),
        }),
    }

    if verbose {
        println!("  stress run took {:.2?}", elapsed);
    }

    results
}
