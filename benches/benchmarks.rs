criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        eliminating_dominated_strategies,
        solving_cfr_dilemma,
        solving_cfr_meeting,
        solving_rollouts_conference,
        searching_mcts_perfect,
        computing_nash_conv,
        rendering_public_prompt,
}

fn eliminating_dominated_strategies(c: &mut criterion::Criterion) {
    let ref game = Bimatrix::prisoners_dilemma();
    c.bench_function("iterated dominance on the prisoner's dilemma", |b| {
        b.iter(|| Dominance::solve(game))
    });
}

fn solving_cfr_dilemma(c: &mut criterion::Criterion) {
    c.bench_function("cfr solve prisoner's dilemma (100 epochs)", |b| {
        b.iter(|| VanillaCfr::new(Bimatrix::prisoners_dilemma(), 0).train(100))
    });
}

fn solving_cfr_meeting(c: &mut criterion::Criterion) {
    let game = Scenario::classic().build().unwrap();
    c.bench_function("cfr solve classic meeting (100 epochs)", |b| {
        b.iter(|| VanillaCfr::new(game.clone(), 0).train(100))
    });
}

fn solving_rollouts_conference(c: &mut criterion::Criterion) {
    let game = Scenario::conference(monday()).build().unwrap();
    c.bench_function("rollout mccfr on the conference (10 epochs)", |b| {
        b.iter(|| RolloutCfr::new(game.clone(), 0).train(10))
    });
}

fn searching_mcts_perfect(c: &mut criterion::Criterion) {
    let game = Scenario::perfect(monday()).build().unwrap();
    c.bench_function("uct search on the public meeting (500 playouts)", |b| {
        b.iter(|| Mcts::new(game.clone(), MCTS_EXPLORATION, 0).solve(500))
    });
}

fn computing_nash_conv(c: &mut criterion::Criterion) {
    let game = Scenario::classic().build().unwrap();
    let mut cfr = VanillaCfr::new(game.clone(), 0);
    cfr.train(100);
    let ref strategy = cfr.strategy();
    c.bench_function("exact nash conv of the classic meeting", |b| {
        b.iter(|| nash_conv(&game, strategy))
    });
}

fn rendering_public_prompt(c: &mut criterion::Criterion) {
    let game = Scenario::perfect(monday()).build().unwrap();
    let ref history = History::from(vec![(Seat::from(0), Slot::from(12)), (Seat::from(1), Slot::from(15))]);
    c.bench_function("render a public-information prompt", |b| {
        b.iter(|| game.prompt(Seat::from(2), history, &[Slot::from(15)]))
    });
}

fn monday() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

use chatgame::*;
