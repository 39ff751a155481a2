// src/bin/poker_stress_test.rs
//
// Стресс-тест: длинные серии раздач между ботами, проверка сохранения фишек.

use anyhow::{bail, Result};
use clap::Parser;

use poker_hand_engine::domain::{ActorId, Chips, HandId, Stage};
use poker_hand_engine::engine::{EngineConfig, HandEngine, HandStatus, SeatRequest};
use poker_hand_engine::infra::{init_tracing, IdGenerator, RngSeed};

#[derive(Parser, Debug)]
#[command(about = "Прогон раздач между ботами")]
struct Args {
    /// Сколько независимых серий (у каждой свой seed).
    #[arg(long, default_value_t = 16)]
    runs: u64,

    #[arg(long, default_value_t = 4)]
    bots: usize,

    #[arg(long, default_value_t = 200)]
    hands_per_run: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Итог одной раздачи, который нам нужен для статистики.
struct HandStats {
    pot_awarded: u64,
    reached_showdown: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing("poker_stress_test", "warn");

    println!(
        "[STRESS] {} серий, по {} ботов, по {} раздач.",
        args.runs, args.bots, args.hands_per_run
    );

    let base = RngSeed::from_u64(args.seed);
    let ids = IdGenerator::new();

    let mut total_hands: u64 = 0;
    let mut total_pot: u64 = 0;
    let mut max_pot: u64 = 0;
    let mut num_showdowns: u64 = 0;

    for run in 1..=args.runs {
        let rng = base.derive(run, 0, 0).to_rng();
        let mut engine = HandEngine::new(run, EngineConfig::default(), Box::new(rng))?;

        for _ in 0..args.hands_per_run {
            let stats = play_single_hand(&mut engine, ids.next_hand_id(), args.bots)?;
            total_hands += 1;
            total_pot += stats.pot_awarded;
            max_pot = max_pot.max(stats.pot_awarded);
            if stats.reached_showdown {
                num_showdowns += 1;
            }
        }
    }

    println!();
    println!("=========== STRESS TEST SUMMARY ===========");
    println!("Всего сыграно раздач: {}", total_hands);
    if total_hands > 0 {
        println!("Средний банк: {}", total_pot / total_hands);
        println!("Максимальный банк: {}", max_pot);
        println!("Раздач дошло до шоудауна: {}", num_showdowns);
    }
    println!("===========================================");
    Ok(())
}

fn play_single_hand(engine: &mut HandEngine, hand_id: HandId, bots: usize) -> Result<HandStats> {
    let seats: Vec<SeatRequest> = (0..bots)
        .map(|i| {
            let id = i as ActorId + 1;
            SeatRequest::bot(id, format!("Bot {id}"), Chips::new(1_000 + 500 * i as u64))
        })
        .collect();

    let blind = engine.config().blind_amount;
    engine.request_hand(hand_id, seats, blind)?;
    let status = engine.run_until_blocked()?;

    let closing: Chips = engine.actors().iter().map(|a| a.balance).sum();
    if closing != engine.opening_total() {
        bail!(
            "[hand_id={}] фишки не сошлись: было {}, стало {}",
            hand_id,
            engine.opening_total(),
            closing
        );
    }

    match status {
        HandStatus::Finished(summary) => Ok(HandStats {
            pot_awarded: summary.pot_awarded.0,
            reached_showdown: summary.final_stage == Stage::Showdown,
        }),
        other => bail!("[hand_id={}] раздача без человека остановилась: {:?}", hand_id, other),
    }
}
