use std::env;
use std::sync::Arc;

use localrag_agent::confidence::cite;
use localrag_agent::Iteration;
use localrag_core::config::Config;
use localrag_cli::{build_agent, build_index, init_tracing};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { eprintln!("Usage: {} <ask|corpus> [args...]", prog); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ask" => {
            let debug = args.iter().any(|a| a == "--debug" || a == "-d");
            let question = args.iter().filter(|a| !a.starts_with('-')).cloned().collect::<Vec<_>>().join(" ");
            if question.trim().is_empty() { eprintln!("Usage: localrag ask \"<question>\" [--debug]"); std::process::exit(1); }

            let index = Arc::new(build_index(&settings));
            let agent = build_agent(&settings, index);
            let answer = agent.ask(&question)?;

            println!("{}\n", answer.final_answer);
            println!("Confidence: {:.2}", answer.confidence);
            for doc in &answer.documents { println!("  - {} (score {:.3})", cite(doc.metadata()), doc.score); }
            if debug {
                for (i, it) in answer.iterations.iter().enumerate() {
                    match it {
                        Iteration::Search { search_query, num_results } => println!("  step {}: SEARCH {:?} → {} docs", i + 1, search_query, num_results),
                        Iteration::Finish { reason } => println!("  step {}: FINISH ({:?})", i + 1, reason),
                    }
                }
            }
        }
        "corpus" => {
            let index = build_index(&settings);
            println!("Corpus directory: {}", index.dir().display());
            let chunks = index.chunks();
            let mut per_file: Vec<(&str, usize)> = Vec::new();
            for c in chunks {
                if let Some((file, n)) = per_file.last_mut() {
                    if *file == c.metadata.file { *n += 1; continue; }
                }
                per_file.push((c.metadata.file.as_str(), 1));
            }
            for (file, pages) in &per_file { println!("  {:<40} {:>5} pages", file, pages); }
            println!("{} pages from {} files", chunks.len(), per_file.len());
        }
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}
