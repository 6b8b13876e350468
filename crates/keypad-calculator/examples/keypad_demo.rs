//! Keypad Calculator Demo
//!
//! Walks both front ends through the same key sequences, then runs the
//! shared driver verifications against each.
//!
//! Run with: cargo run --example keypad_demo --features tui

use std::time::Duration;

use keypad_calculator::driver::{run_all_verifications, CalculatorDriver, TuiDriver};
use keypad_calculator::wasm::WasmDriver;

fn show<D: CalculatorDriver>(driver: &D) {
    println!("   ┌──────────────────────────┐");
    println!("   │ {:>24} │", driver.previous_display());
    println!("   │ {:>24} │", driver.current_display());
    println!("   └──────────────────────────┘");
}

fn walkthrough<D: CalculatorDriver>(name: &str, driver: &mut D) {
    println!("🧮 {name}");
    println!("─────────────────────────────────");

    println!("\n1️⃣  Live preview: 12+3");
    driver.type_keys("12+3");
    show(driver);

    println!("\n2️⃣  Chaining: *2=");
    driver.type_keys("*2=");
    show(driver);

    println!("\n3️⃣  Float noise is rounded away: 0.1+0.2=");
    driver.press_key("Escape");
    driver.type_keys("0.1+0.2=");
    show(driver);

    println!("\n4️⃣  Grouping: 1234567.891");
    driver.press_key("Escape");
    driver.type_keys("1234567.891");
    show(driver);

    println!("\n5️⃣  Divide by zero: 7/0=");
    driver.press_key("Escape");
    driver.type_keys("7/0=");
    show(driver);

    println!("\n6️⃣  Two seconds later");
    driver.advance(Duration::from_millis(2000));
    show(driver);
    println!();
}

fn main() {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              Keypad Calculator - Driver Demo                 ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    walkthrough("Terminal front end", &mut TuiDriver::new());
    walkthrough("Browser front end (mock DOM)", &mut WasmDriver::new());

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Running shared verifications");
    println!("═══════════════════════════════════════════════════════════════");

    print!("  ✓ TuiDriver ... ");
    run_all_verifications(&mut TuiDriver::new());
    println!("PASSED");

    print!("  ✓ WasmDriver ... ");
    run_all_verifications(&mut WasmDriver::new());
    println!("PASSED");
}
