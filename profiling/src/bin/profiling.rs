use clap::Parser;
use nerlabel::{compile_batch, Compiler, EntityAnnotation, StoredAnnotation};
use serde::Deserialize;
use serde_jsonlines::json_lines;
use std::io;
use std::ops::Range;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Deserialize)]
struct Example {
    text: String,
    entities: Vec<EntityAnnotation>,
}

fn build_annotations<P: AsRef<Path>>(path: P) -> io::Result<Vec<StoredAnnotation>> {
    json_lines::<Example, P>(path)?
        .enumerate()
        .map(|(id, example)| {
            example.map(|ex| StoredAnnotation {
                id,
                text: ex.text,
                entities: ex.entities,
            })
        })
        .collect()
}

#[derive(Debug, Parser)]
struct Args {
    #[arg(short, long, default_value_t = 1)]
    n_samples: u32,
    #[arg(short, long, default_value_t=String::from("big"))]
    dataset: String,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let n_samples = args.n_samples;
    let iter = Range {
        start: 0,
        end: n_samples,
    };
    let path = format!("./data/datasets/{}_dataset.jsonl", args.dataset);
    let annotations = build_annotations(&path)?;
    let compiler = Compiler::default();
    let mut total_duration = Duration::ZERO;
    let mut conflicts = 0;
    for _ in iter {
        let now = Instant::now();
        let batch = compile_batch(&compiler, &annotations);
        let elapsed = now.elapsed();
        total_duration += elapsed;
        conflicts = batch.conflicts.len();
    }
    println!(
        "Total duration: {} with {n_samples} samples of {} annotations ({conflicts} conflicts)",
        total_duration.as_secs_f64(),
        annotations.len()
    );
    Ok(())
}
