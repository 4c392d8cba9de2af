use anyhow::{Context, Result, ensure};
use clap::Parser;
use game_core::{BehaviorState, FrameInput, Game, RunPhase, SimConfig, vec2};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Drives sessions with random input and checks state invariants after every frame.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5_000)]
    frames: u32,
    /// Consecutive seeds to run, starting at --seed
    #[arg(short, long, default_value_t = 8)]
    runs: u64,
}

fn unit(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u64() >> 40) as f32 / (1u64 << 24) as f32
}

fn signed(rng: &mut ChaCha8Rng) -> f32 {
    unit(rng) * 2.0 - 1.0
}

fn chance(rng: &mut ChaCha8Rng, p: f32) -> bool {
    unit(rng) < p
}

fn random_input(rng: &mut ChaCha8Rng) -> FrameInput {
    FrameInput {
        move_intent: vec2(signed(rng), signed(rng)),
        look: vec2(signed(rng) * 0.2, signed(rng) * 0.2),
        attack: chance(rng, 0.5),
        dash: chance(rng, 0.05),
        interact: chance(rng, 0.2),
        card_choice: chance(rng, 0.3).then(|| (rng.next_u64() % 4) as usize),
    }
}

fn random_dt(rng: &mut ChaCha8Rng) -> f32 {
    if chance(rng, 0.01) { 0.25 } else { 0.001 + unit(rng) * 0.05 }
}

fn check_invariants(game: &Game) -> Result<()> {
    let player = game.player();
    ensure!(
        player.hp >= 0 && player.hp <= player.max_hp,
        "player hp {} outside 0..={}",
        player.hp,
        player.max_hp
    );
    ensure!(player.shield >= 0, "negative shield {}", player.shield);
    ensure!(player.pitch.abs() <= 1.3 + 1e-6, "pitch {} beyond clamp", player.pitch);
    ensure!(
        (game.phase() == RunPhase::Dead) == (player.hp == 0),
        "phase {:?} disagrees with hp {}",
        game.phase(),
        player.hp
    );
    ensure!(
        (game.phase() == RunPhase::Upgrading) == game.offer().is_some(),
        "phase {:?} disagrees with the card offer",
        game.phase()
    );

    let grid = &game.floor().grid;
    let cell = grid.cell_of(player.pos.x, player.pos.z);
    ensure!(grid.is_floor(cell), "player stands in wall cell {cell:?}");
    for enemy in game.floor().enemies.values() {
        ensure!(enemy.hp > 0 && enemy.hp <= enemy.max_hp, "enemy hp {} out of range", enemy.hp);
        ensure!(
            enemy.state != BehaviorState::Hurt || enemy.hurt_timer > 0.0,
            "hurt enemy with expired timer"
        );
    }
    Ok(())
}

fn fuzz_one(seed: u64, frames: u32) -> Result<u32> {
    let mut game =
        Game::new(seed, SimConfig::default()).context("Failed to generate the first floor")?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    check_invariants(&game).context("invariant broken before the first frame")?;

    for frame in 0..frames {
        let input = random_input(&mut rng);
        game.step(random_dt(&mut rng), &input);
        game.drain_log();
        check_invariants(&game).with_context(|| format!("seed {seed}, frame {frame}"))?;
        if game.phase() == RunPhase::Dead {
            game.restart().context("Failed to restart after death")?;
        }
    }
    Ok(game.floor().index)
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Fuzzing {} runs from seed {} for {} frames each...",
        args.runs, args.seed, args.frames
    );
    for seed in args.seed..args.seed.saturating_add(args.runs) {
        let floor = fuzz_one(seed, args.frames)?;
        println!("seed {seed}: ok (ended on floor {floor})");
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
