//! Console reporting for the merge run.
//!
//! Prints the full pairwise score table, the accepted matches, and the
//! unmatched classes per side. The relational sub-score is carried by every
//! pair but not displayed; its default weight is zero.

use concord::{Diagram, MergeOutcome, ScoredPair};

/// Print the score table, match list, and unmatched classes for one run.
pub fn print_outcome(outcome: &MergeOutcome, a: &Diagram, b: &Diagram) {
    println!("\n--- Similarity scores for all class pairs ---");
    print_score_table(outcome.scores(), a, b);

    println!("\n--- Matching candidates by combined score ---");
    if outcome.matches().pairs().is_empty() {
        println!("No pairs cleared the matching passes.");
    } else {
        print_score_table(outcome.matches().pairs(), a, b);
    }

    println!("\n--- Unmatched classes ---");
    let unmatched_a = outcome.matches().unmatched_a();
    let unmatched_b = outcome.matches().unmatched_b();
    if unmatched_a.is_empty() && unmatched_b.is_empty() {
        println!("All classes were matched.");
    } else {
        if !unmatched_a.is_empty() {
            println!("Unmatched in diagram A:");
            for &index in unmatched_a {
                println!("  - {}", a.classes()[index].name());
            }
        }
        if !unmatched_b.is_empty() {
            println!("Unmatched in diagram B:");
            for &index in unmatched_b {
                println!("  - {}", b.classes()[index].name());
            }
        }
    }
}

fn print_score_table(pairs: &[ScoredPair], a: &Diagram, b: &Diagram) {
    println!(
        "{:<8}{:<10}{:<12}{:<10}{:<20}{:<20}",
        "Total", "Semantic", "Structural", "Spatial", "Class A", "Class B"
    );
    println!("{}", "-".repeat(78));
    for pair in pairs {
        println!(
            "{:<8.4}{:<10.4}{:<12.4}{:<10.4}{:<20}{:<20}",
            pair.total(),
            pair.semantic(),
            pair.structural(),
            pair.spatial(),
            a.classes()[pair.a_index()].name(),
            b.classes()[pair.b_index()].name(),
        );
    }
}
