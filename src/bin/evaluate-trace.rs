/// Evaluate each prediction strategy against one or more text traces.

use augur::*;
use augur::stats::*;
use std::env;

fn run_test(records: &[BranchRecord], mut p: impl DirectionPredictor) {
    let mut stat = TraceStats::new();

    for record in records.iter() {
        let prediction = p.predict(record.pc);
        p.update(record.pc, record.outcome);
        stat.update_global(record, prediction);
    }

    println!("  {:24} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
        p.name(),
        stat.global_hits(),
        stat.global_brns(),
        stat.hit_rate() * 100.0,
        stat.global_miss()
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("usage: {} <trace files>", args[0]);
        return;
    }
    let traces = TextTraceSet::new_from_slice(&args[1..]);

    for trace in traces {
        println!("[*] {} ({} branches)", trace.name(), trace.num_entries());
        let records = trace.records();
        run_test(records, NotTakenPredictor);
        run_test(records, EngineConfig::static_taken().build());
        run_test(records, EngineConfig::gshare(13).build());
        run_test(records, EngineConfig::tournament(9, 10, 10).build());
        run_test(records, EngineConfig::perceptron().build());
    }

}
