//! Coherence Lens CLI
//!
//! One-shot:    coherence_lens [--lens ID] [--json] CONSISTENCY WISDOM ACTIVATION BELONGING
//! Interactive: coherence_lens

use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use tracing::info;

use coherence_lens::config::{ConfigManager, EngineConfig};
use coherence_lens::selection::ViabilityAssessment;
use coherence_lens::utils::telemetry::{init_logging, DEFAULT_FILTER};
use coherence_lens::{PerceptionEngine, PerceptionReport, RawDimensions};

// ──────────────────────────────────────────────────────────────────────────────
// ARGUMENTS
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Invocation {
    lens: Option<String>,
    json: bool,
    values: Vec<f64>,
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut invocation = Invocation::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lens" | "-l" => {
                let id = iter.next().context("--lens requires a lens id")?;
                invocation.lens = Some(id.clone());
            }
            "--json" => invocation.json = true,
            value => {
                let v: f64 = value.parse().with_context(|| format!("not a number: {}", value))?;
                invocation.values.push(v);
            }
        }
    }
    Ok(invocation)
}

fn raw_from(values: &[f64]) -> Result<RawDimensions> {
    match values {
        [c, w, a, b] => Ok(RawDimensions::new(*c, *w, *a, *b)),
        _ => bail!("expected 4 values (consistency wisdom activation belonging), got {}", values.len()),
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// OUTPUT
// ──────────────────────────────────────────────────────────────────────────────

fn print_report(report: &PerceptionReport) {
    let d = &report.dimensions;
    let assessment = ViabilityAssessment::assess(report);

    println!("{}", "─".repeat(50));
    println!("🔬 Lens: {}", report.lens_id);
    println!("   Consistency:    {:.3}", d.consistency);
    println!("   Wisdom:         {:.3}", d.wisdom);
    println!("   Activation:     {:.3} (optimized {:.3})", d.activation, report.optimized_activation);
    println!("   Belonging:      {:.3}", d.belonging);
    println!("   Temporal depth: {:.3}", d.temporal_depth);
    println!("   Interference:   {:.3}", d.interference);
    println!("   COHERENCE:      {:.3}  [confidence: {}]", report.coherence, report.confidence);

    if !report.patterns.is_empty() {
        println!("🧬 Patterns: {}", report.patterns.join(", "));
    }
    if !report.warnings.is_empty() {
        println!("⚠️  Warnings: {}", report.warnings.join(", "));
    }

    println!("⚔️  Viability: {:?} - {}", assessment.viability, assessment.recommendation);
    for caution in &assessment.cautions {
        println!("   • {}", caution);
    }
    println!("{}", "─".repeat(50));
}

fn emit(report: &PerceptionReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_report(report);
    }
    Ok(())
}

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    init_logging(DEFAULT_FILTER)?;

    let config = match std::env::var("COHERENCE_LENS_CONFIG") {
        Ok(path) => ConfigManager::new(path).load().await?,
        Err(_) => EngineConfig::default(),
    };
    let engine = config.build_engine().await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let invocation = parse_args(&args)?;
        let raw = raw_from(&invocation.values)?;
        let report = engine.perceive(&raw, invocation.lens.as_deref())?;
        return emit(&report, invocation.json);
    }

    interactive(&engine)
}

fn interactive(engine: &PerceptionEngine) -> Result<()> {
    let mut lens: Option<String> = None;
    let mut json = false;

    println!("\n🔬 Coherence Lens - lenses: {}", engine.registry().ids().join(", "));
    println!("💡 Commands: '<c> <w> <a> <b>' | 'lens <id>' | 'lenses' | 'all <c> <w> <a> <b>' | 'json' | 'quit'\n");

    loop {
        print!("🔍 [{}] ", lens.as_deref().unwrap_or(engine.registry().default_id()));
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_lowercase();
        let rest: Vec<String> = words.map(str::to_string).collect();

        match command.as_str() {
            "quit" | "exit" | "q" => {
                println!("\n👋 Goodbye!\n");
                break;
            }
            "lenses" => {
                for id in engine.registry().ids() {
                    if let Ok(calibration) = engine.registry().resolve(Some(id.as_str())) {
                        println!("   {:<16} {}", calibration.id, calibration.description);
                    }
                }
            }
            "lens" => match rest.first() {
                Some(id) if engine.registry().contains(id) => {
                    info!("Switched to lens '{}'", id);
                    lens = Some(id.clone());
                }
                Some(id) => println!("❌ Unknown lens: {}", id),
                None => lens = None,
            },
            "json" => {
                json = !json;
                println!("JSON output {}", if json { "on" } else { "off" });
            }
            "all" => {
                let outcome = parse_args(&rest).and_then(|inv| raw_from(&inv.values));
                match outcome {
                    Ok(raw) => {
                        for (id, report) in engine.perceive_all_lenses(&raw) {
                            match report {
                                Ok(report) => println!("   {:<16} {:.3} ({})", id, report.coherence, report.confidence),
                                Err(e) => println!("   {:<16} ❌ {}", id, e),
                            }
                        }
                    }
                    Err(e) => println!("❌ {}", e),
                }
            }
            _ => {
                let outcome = parse_args(&line.split_whitespace().map(str::to_string).collect::<Vec<_>>())
                    .and_then(|inv| raw_from(&inv.values))
                    .and_then(|raw| Ok(engine.perceive(&raw, lens.as_deref())?));
                match outcome {
                    Ok(report) => emit(&report, json)?,
                    Err(e) => println!("❌ Error: {}", e),
                }
            }
        }
    }

    Ok(())
}
