// Side-by-side run of both acquisition strategies at a small table.

use santap::core::StrategyKind;

fn main() {
    println!("--- Santap Banquet ---");

    let seats = 5;
    let meals = 500;

    println!("\n[1] Admission strategy ({seats} seats, {meals} meals each)...");
    let admission = santap::banquet(seats, meals, StrategyKind::Admission)
        .expect("admission run failed");
    println!(
        "Admission cleared the table in {:.3} milliseconds",
        admission.elapsed().as_secs_f64() * 1e3
    );

    println!("\n[2] Backoff strategy ({seats} seats, {meals} meals each)...");
    let backoff =
        santap::banquet(seats, meals, StrategyKind::Backoff).expect("backoff run failed");
    println!(
        "Backoff cleared the table in {:.3} milliseconds",
        backoff.elapsed().as_secs_f64() * 1e3
    );

    println!("\n--- Everyone is fed ---");
}
