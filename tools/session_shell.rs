/// Session Shell — interactive driver for the role-play and sentiment engines.
///
/// Usage: session_shell [--scenarios <path.ron>] [--seed <n>]
///
/// Commands:
///   scenarios                — list available scenarios
///   start <scenario> <role>  — begin a session playing the given role
///   say <message>            — send a message and print the counterpart reply
///   end                      — finish the session and print the feedback
///   sentiment <text>         — score a text with the sentiment engine
///   seed <n>                 — set RNG seed (rebuilds the engine)
///   help                     — list commands
///   quit                     — exit

use converse_engine::core::scorer::SentimentScorer;
use converse_engine::core::session::RolePlayEngine;
use converse_engine::presets;
use converse_engine::schema::message::Speaker;
use converse_engine::schema::scenario::ScenarioCatalog;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut scenarios_path = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenarios" if i + 1 < args.len() => {
                i += 1;
                scenarios_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut catalog = presets::preset_catalog();
    if let Some(ref path) = scenarios_path {
        match ScenarioCatalog::load_from_ron(Path::new(path)) {
            Ok(loaded) => {
                println!("Loaded scenarios: {}", path);
                catalog.merge(loaded);
            }
            Err(e) => {
                eprintln!("ERROR loading scenarios {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    println!("{} scenarios available", catalog.scenarios.len());
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    let mut engine = RolePlayEngine::builder().seed(seed).build();
    let scorer = SentimentScorer::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("session> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c.to_lowercase(), r.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "scenarios" => {
                let mut ids: Vec<&String> = catalog.scenarios.keys().collect();
                ids.sort();
                for id in ids {
                    let s = &catalog.scenarios[id];
                    let roles: Vec<&str> = s.roles.iter().map(|r| r.id.as_str()).collect();
                    println!(
                        "  {} — {} [{}] roles: {}",
                        id,
                        s.title,
                        s.difficulty.as_str(),
                        roles.join(", ")
                    );
                }
            }
            "start" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if parts.len() < 2 {
                    println!("Usage: start <scenario> <role>");
                    continue;
                }
                let scenario = match catalog.get(parts[0]) {
                    Some(s) => s.clone(),
                    None => {
                        println!("Unknown scenario: {}", parts[0]);
                        continue;
                    }
                };
                match engine.start_scenario(scenario, parts[1]) {
                    Ok(()) => {
                        for msg in engine.messages() {
                            println!("[system] {}", msg.message);
                        }
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "say" => {
                if rest.is_empty() {
                    println!("Usage: say <message>");
                    continue;
                }
                match engine.send_message(rest) {
                    Ok(Some(reply)) => {
                        if let Speaker::Role(ref id) = reply.speaker {
                            println!("[{}] {}", id, reply.message);
                        }
                    }
                    Ok(None) => println!("(no counterpart to reply)"),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "end" => match engine.end_scenario() {
                Ok(feedback) => {
                    println!("\n--- Feedback ---");
                    println!("Score: {}/100", feedback.score);
                    for s in &feedback.strengths {
                        println!("  + {}", s);
                    }
                    for imp in &feedback.improvements {
                        println!("  - {}", imp);
                    }
                    println!("{}", feedback.overall_comment);
                    println!("--- End ---\n");
                }
                Err(e) => println!("ERROR: {}", e),
            },
            "sentiment" => {
                if rest.is_empty() {
                    println!("Usage: sentiment <text>");
                    continue;
                }
                let r = scorer.analyze(rest);
                println!(
                    "score={:.3} label={} magnitude={:.3} confidence={:.3}",
                    r.score,
                    r.label.as_str(),
                    r.magnitude,
                    r.confidence
                );
            }
            "seed" => {
                if rest.is_empty() {
                    println!("Current seed: {}", seed);
                    continue;
                }
                match rest.parse::<u64>() {
                    Ok(s) => {
                        seed = s;
                        engine = RolePlayEngine::builder().seed(seed).build();
                        println!("Seed set to {} (engine reset)", seed);
                    }
                    Err(_) => println!("Invalid seed: {}", rest),
                }
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("Session Shell — interactive driver for the role-play and sentiment engines.");
    println!();
    println!("Usage: session_shell [--scenarios <path.ron>] [--seed <n>]");
    println!();
    println!("  --scenarios <path>  Extra scenario catalog (RON), merged over presets");
    println!("  --seed <n>          RNG seed for NPC selection (default: 42)");
}

fn print_help() {
    println!("Commands:");
    println!("  scenarios                List available scenarios");
    println!("  start <scenario> <role>  Begin a session playing the given role");
    println!("  say <message>            Send a message, print the counterpart reply");
    println!("  end                      Finish the session and print feedback");
    println!("  sentiment <text>         Score a text with the sentiment engine");
    println!("  seed <n>                 Set RNG seed (resets the session engine)");
    println!("  help                     Show this help");
    println!("  quit                     Exit");
}
