//! Live pomodoro timer server.
//!
//! Ticks one shared timer once per second and pushes every change to the
//! connected viewers over SSE (`/events`) or WebSocket (`/ws`).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pomolive-server
//! cargo run --bin pomolive-server -- --host 0.0.0.0 --port 3000 --seconds-per-tick 60
//! ```

use std::sync::Arc;

use clap::Parser;
use pomolive_server::{
    domain::{TimerConfig, TimerState},
    infrastructure::{
        event_hub::ChannelEventHub, renderer::JsonRenderer, repository::InMemoryTimerRepository,
    },
    ui::Server,
    usecase::{
        Announcer, EventDispatcher, GetTimerStateUseCase, StatsUseCase, SubscribeUseCase,
        TickConfig, TickScheduler, TimerControlUseCase,
    },
};
use pomolive_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "pomolive-server")]
#[command(about = "Live pomodoro timer server with SSE and WebSocket push", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "1323")]
    port: u16,

    /// Simulated seconds added to the running session on every tick
    #[arg(long, default_value = "1")]
    seconds_per_tick: u64,

    /// Initial work session length in minutes
    #[arg(long, default_value = "25")]
    preferred_minutes: u32,

    /// Daily session goal used by the stats endpoint
    #[arg(long, default_value = "8")]
    daily_goal: u32,

    /// Start with auto-break disabled
    #[arg(long)]
    no_auto_break: bool,

    /// Queue length of each subscriber before it is evicted
    #[arg(long, default_value = "100")]
    subscriber_capacity: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. EventHub and its dispatcher
    // 3. UseCases
    // 4. Tick scheduler
    // 5. Server

    // 1. Create Repository (in-memory timer state)
    let config = TimerConfig {
        auto_break: !args.no_auto_break,
        daily_goal: args.daily_goal,
        ..TimerConfig::default()
    }
    .with_preferred_minutes(args.preferred_minutes);
    tracing::info!(
        "Timer ready: {} min sessions, auto-break {}, daily goal {}",
        config.preferred_duration.as_secs() / 60,
        if config.auto_break { "on" } else { "off" },
        config.daily_goal
    );
    let state = Arc::new(Mutex::new(TimerState::new(config)));
    let repository = Arc::new(InMemoryTimerRepository::new(state));

    // 2. Create EventHub and start the task that drains its queue
    let hub = Arc::new(ChannelEventHub::new());
    let (dispatcher, _dispatcher_handle) = EventDispatcher::spawn(hub.clone());
    let announcer = Announcer::new(Arc::new(JsonRenderer::new()), dispatcher);
    let clock = Arc::new(SystemClock);

    // 3. Create UseCases
    let timer_control_usecase = Arc::new(TimerControlUseCase::new(
        repository.clone(),
        announcer.clone(),
        clock.clone(),
    ));
    let subscribe_usecase = Arc::new(SubscribeUseCase::new(
        repository.clone(),
        announcer.clone(),
        hub,
        args.subscriber_capacity,
    ));
    let get_timer_state_usecase = Arc::new(GetTimerStateUseCase::new(repository.clone()));
    let stats_usecase = Arc::new(StatsUseCase::new(repository.clone(), clock.clone()));

    // 4. Start the tick scheduler
    let scheduler = TickScheduler::new(
        repository,
        announcer,
        clock,
        TickConfig {
            seconds_per_tick: args.seconds_per_tick.max(1),
            ..TickConfig::default()
        },
    );
    tokio::spawn(scheduler.run());

    // 5. Create and run the server
    let server = Server::new(
        timer_control_usecase,
        subscribe_usecase,
        get_timer_state_usecase,
        stats_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
