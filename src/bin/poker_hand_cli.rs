// src/bin/poker_hand_cli.rs
//
// Консольная раздача: человек против ботов за одним столом.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use poker_hand_engine::domain::{ActorId, Card, Chips, HandId, TableId};
use poker_hand_engine::engine::{
    Action, EngineConfig, HandEngine, HandEvent, HandEventKind, HandStatus, RandomSource,
    SeatRequest, TableDefaults,
};
use poker_hand_engine::infra::{
    init_tracing, BankrollLedger, ExternalId, IdGenerator, JsonFileBankrollStore, RngSeed,
    SystemRng,
};

const TABLE_ID: TableId = 1;
const HUMAN_ID: ActorId = 1;

#[derive(Parser, Debug)]
#[command(author, version, about = "Раздача против ботов в терминале")]
struct Args {
    /// Имя пользователя (ключ банкролла).
    #[arg(long, default_value = "player")]
    name: String,

    /// Блайнд; по умолчанию из конфига.
    #[arg(long)]
    blind: Option<u64>,

    /// Seed для воспроизводимых раздач.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON с `EngineConfig`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Файл банкролла.
    #[arg(long, default_value = "bankroll.json")]
    store: PathBuf,

    /// Сколько раздач сыграть подряд.
    #[arg(long, default_value_t = 1)]
    hands: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing("poker_hand_cli", "warn");

    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("не удалось загрузить конфиг {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let blind = args.blind.map(Chips::new).unwrap_or(config.blind_amount);

    let ledger = BankrollLedger::new(JsonFileBankrollStore::new(args.store.clone()));
    let user = ExternalId::new(args.name.clone());
    let today = chrono::Local::now().date_naive();

    let login = ledger.login(&user, today)?;
    if login.is_new_user {
        println!("Добро пожаловать, {}!", user);
    }
    if !login.bonus_granted.is_zero() {
        println!("Ежедневный бонус: +{}", login.bonus_granted);
    }
    println!("Баланс: {}", login.record.balance);

    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(RngSeed::from_u64(seed).derive(TABLE_ID, 0, 0).to_rng()),
        None => Box::new(SystemRng),
    };
    let mut engine = HandEngine::new(TABLE_ID, config, rng)?;
    let ids = IdGenerator::new();

    let defaults = TableDefaults::default();
    let mut bot_balances: Vec<Chips> = defaults.bots.iter().map(|b| b.balance).collect();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    for n in 0..args.hands {
        let lease = ledger.open_session(&user)?;
        let opening = lease.opening_balance();
        if opening < blind {
            println!("Недостаточно фишек для блайнда {}: {}", blind, opening);
            ledger.close_session(lease, opening)?;
            break;
        }

        let mut seats = vec![SeatRequest::human(HUMAN_ID, args.name.clone(), opening)];
        for (i, bot) in defaults.bots.iter().enumerate() {
            if bot_balances[i] >= blind {
                seats.push(SeatRequest::bot(HUMAN_ID + 1 + i as ActorId, bot.name.clone(), bot_balances[i]));
            }
        }
        if seats.len() < 2 {
            println!("У ботов кончились фишки.");
            ledger.close_session(lease, opening)?;
            break;
        }

        println!();
        println!("=========== РАЗДАЧА {} ===========", n + 1);

        let closing = match play_hand(&mut engine, ids.next_hand_id(), seats, blind, &mut input) {
            Ok(closing) => closing,
            Err(e) => {
                ledger.close_session(lease, opening)?;
                return Err(e);
            }
        };

        let human_closing = closing
            .iter()
            .find(|(id, _)| *id == HUMAN_ID)
            .map(|(_, c)| *c)
            .unwrap_or(opening);
        for (i, balance) in bot_balances.iter_mut().enumerate() {
            if let Some(a) = engine.actor(HUMAN_ID + 1 + i as ActorId) {
                *balance = a.balance;
            }
        }

        let record = ledger.close_session(lease, human_closing)?;
        println!("Ваш баланс: {}", record.balance);
    }

    Ok(())
}

/// Сыграть одну раздачу до конца. Возвращает финальные балансы.
fn play_hand(
    engine: &mut HandEngine,
    hand_id: HandId,
    seats: Vec<SeatRequest>,
    blind: Chips,
    input: &mut impl BufRead,
) -> Result<Vec<(ActorId, Chips)>> {
    engine.request_hand(hand_id, seats, blind)?;

    let mut printed: u32 = 0;
    loop {
        let status = if engine.status().is_terminal() {
            engine.status().clone()
        } else {
            engine.run_until_blocked()?
        };
        printed = print_new_events(engine, printed);

        match status {
            HandStatus::AwaitingHuman(_) => {
                print_prompt(engine)?;

                let action = loop {
                    let mut line = String::new();
                    if input.read_line(&mut line)? == 0 {
                        bail!("ввод закончился посреди раздачи");
                    }
                    match parse_action(line.trim()) {
                        Some(a) => break a,
                        None => println!("Не понял. f / k / c / b N / r N / a"),
                    }
                };

                if let Err(e) = engine.submit_human_action(action) {
                    println!("Отклонено: {e}");
                }
            }
            HandStatus::Finished(summary) => {
                for (id, cards) in &summary.revealed_hands {
                    let shown: Vec<String> = cards.iter().map(Card::pretty).collect();
                    println!("  {} открывает {}", name_of(engine, *id), shown.join(" "));
                }
                return Ok(summary.closing_balances());
            }
            HandStatus::Aborted => {
                return Ok(engine.closing_balances());
            }
            HandStatus::Ongoing | HandStatus::Idle => {
                bail!("движок остановился в неожиданном статусе {status:?}");
            }
        }
    }
}

fn print_prompt(engine: &HandEngine) -> Result<()> {
    let board: Vec<String> = engine.board().iter().map(Card::pretty).collect();
    println!();
    println!("Стадия {} | стол: [{}] | банк {}", engine.stage(), board.join(" "), engine.pot().total());

    if let Some(state) = engine.public_state_for(HUMAN_ID) {
        if let Some(me) = engine.actor(HUMAN_ID) {
            let hole: Vec<String> = me.hole_cards.iter().map(Card::pretty).collect();
            println!("Ваши карты: {} | баланс {}", hole.join(" "), state.balance);
        }
        println!("Колл: {} | повышение доступно: {}", state.to_call, state.can_raise);
    }
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn parse_action(raw: &str) -> Option<Action> {
    let mut parts = raw.split_whitespace();
    let verb = parts.next()?.to_ascii_lowercase();
    let amount = parts.next().and_then(|s| s.parse::<u64>().ok()).map(Chips::new);

    match (verb.as_str(), amount) {
        ("f" | "fold", _) => Some(Action::Fold),
        ("k" | "check", _) => Some(Action::Check),
        ("c" | "call", _) => Some(Action::Call),
        ("a" | "allin", _) => Some(Action::AllIn),
        ("b" | "bet", Some(n)) => Some(Action::Bet(n)),
        ("r" | "raise", Some(n)) => Some(Action::Raise(n)),
        _ => None,
    }
}

fn name_of(engine: &HandEngine, id: ActorId) -> String {
    engine
        .actor(id)
        .map(|a| a.display_name.clone())
        .unwrap_or_else(|| format!("#{id}"))
}

/// Напечатать события с индекса `from`, вернуть новый индекс.
fn print_new_events(engine: &HandEngine, from: u32) -> u32 {
    let events: &[HandEvent] = engine.events_since(from);
    for event in events {
        match &event.kind {
            HandEventKind::HandStarted { blind_amount, .. } => {
                println!("Новая раздача, блайнд {blind_amount}");
            }
            HandEventKind::BlindsPosted { pot_after, .. } => {
                println!("Блайнды внесены, банк {pot_after}");
            }
            HandEventKind::AwaitingHuman { .. } => {}
            HandEventKind::HumanTimedOut { action, .. } => {
                println!("Время вышло: {action}");
            }
            HandEventKind::ActorActed {
                actor_id,
                action,
                pot_after,
                ..
            } => {
                println!("  {}: {} (банк {})", name_of(engine, *actor_id), action, pot_after);
            }
            HandEventKind::StageAdvanced {
                stage,
                revealed_community_cards,
            } => {
                let cards: Vec<String> = revealed_community_cards.iter().map(Card::pretty).collect();
                println!("--- {} {}", stage, cards.join(" "));
            }
            HandEventKind::HandResolved {
                winners, payouts, ..
            } => {
                let names: Vec<String> = winners.iter().map(|id| name_of(engine, *id)).collect();
                println!("Победители: {}", names.join(", "));
                for p in payouts {
                    println!("  {} +{}", name_of(engine, p.actor_id), p.amount);
                }
            }
            HandEventKind::HandAborted { reason, .. } => {
                println!("Раздача прервана: {reason}. Балансы восстановлены.");
            }
        }
    }
    from + events.len() as u32
}
