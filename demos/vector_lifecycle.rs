//! TinyVec Lifecycle Demonstration
//!
//! Walks a vector through growth, checked access, resizing, copying, moving
//! and swapping, printing the length and capacity after each step.

use tiny_containers::{tiny_vec, TinyVec, TinyVecError};

fn show<T: std::fmt::Debug>(label: &str, v: &TinyVec<T>) {
    println!(
        "  {label:<28} len={:<3} cap={:<3} {:?}",
        v.len(),
        v.capacity(),
        v
    );
}

fn main() -> Result<(), TinyVecError> {
    println!("📦 TinyVec Lifecycle");
    println!("====================\n");

    println!("Growth (capacity doubles when full):");
    let mut v = TinyVec::new();
    show("new", &v);
    for i in 1..=5 {
        v.push(i * 10);
        show(&format!("push({})", i * 10), &v);
    }

    println!("\nChecked access:");
    println!("  at(2)        = {:?}", v.at(2));
    println!("  at(9)        = {:?}", v.at(9));
    if let Err(e) = v.at(9) {
        println!("  error text   = {e}");
    }

    println!("\nResize:");
    v.resize(5)?;
    show("resize(5)", &v);
    match v.resize(2) {
        Ok(()) => println!("  resize(2) unexpectedly succeeded"),
        Err(e) => println!("  resize(2) rejected: {e}"),
    }
    show("after rejected resize", &v);

    println!("\nCopy and move:");
    let copy = v.clone();
    show("clone", &copy);
    let mut taken = v.take();
    show("take() result", &taken);
    show("source after take()", &v);

    println!("\nSwap:");
    let mut other = tiny_vec![-1, -2];
    taken.swap(&mut other);
    show("taken after swap", &taken);
    show("other after swap", &other);

    println!("\nDrain from the back:");
    while let Ok(last) = other.remove_last() {
        println!("  remove_last() = {last}");
    }
    match other.remove_last() {
        Err(TinyVecError::Underflow) => println!("  remove_last() on empty = Underflow"),
        result => println!("  unexpected: {result:?}"),
    }
    show("drained", &other);

    Ok(())
}
