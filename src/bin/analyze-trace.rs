/// Print per-branch population statistics for one or more text traces,
/// along with the branches a gshare predictor finds hardest.

use augur::*;
use augur::stats::*;
use std::env;

fn analyze(trace: &TextTrace) {
    let mut engine = EngineConfig::gshare(13).build();
    let mut stat = TraceStats::new();

    for record in trace.records().iter() {
        let prediction = engine.predict(record.pc);
        engine.update(record.pc, record.outcome);
        stat.update_global(record, prediction);
        stat.update_per_branch(record, prediction);
    }

    println!("  {} records, {} unique branches",
        trace.num_entries(), stat.num_unique_branches());
    println!("  {} single-occurence, {} always-taken, {} never-taken",
        stat.num_single_occurence(),
        stat.num_always_taken(),
        stat.num_never_taken()
    );

    println!("  Most common branches:");
    for (pc, data) in stat.get_common_branches(8) {
        println!("    {:08x}: {:8} occ, {:8} taken, {:.2}% hit",
            pc, data.occ, data.times_taken(), data.hit_rate() * 100.0);
    }

    let hard = stat.get_low_rate_branches(8);
    if !hard.is_empty() {
        println!("  Hardest branches (gshare):");
        for (pc, data) in hard {
            println!("    {:08x}: {:8} occ, {:8} taken, {:.2}% hit",
                pc, data.occ, data.times_taken(), data.hit_rate() * 100.0);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("usage: {} <trace files>", args[0]);
        return;
    }
    let traces = TextTraceSet::new_from_slice(&args[1..]);

    for trace in traces {
        println!("[*] {}", trace.name());
        analyze(&trace);
    }

}
