use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stepwise::{Namespace, Pipeline, Step, Values};

// --- Helper: step doing some CPU-bound work on `counter` ---
fn increment_step(name: String, iterations: u64) -> Step {
  Step::new(name, &["counter"], move |args| {
    let mut counter = *args.get::<u64>("counter")?;
    for _i in 0..iterations {
      counter = counter.wrapping_add(1);
    }
    Ok(Values::new().with("counter", counter))
  })
}

fn build_pipeline(num_steps: usize, iterations: u64) -> Pipeline {
  let steps: Vec<Step> = (0..num_steps)
    .map(|i| increment_step(format!("step_{}", i), iterations))
    .collect();
  Pipeline::new(steps).unwrap()
}

// --- Benchmark Functions ---

fn bench_simple_pipeline(c: &mut Criterion) {
  let mut group = c.benchmark_group("SimplePipeline");

  for num_steps in [1, 5, 10].iter() {
    for iterations in [1, 10, 100].iter() {
      let pipeline = build_pipeline(*num_steps, *iterations);

      group.throughput(Throughput::Elements(*num_steps as u64 * *iterations));
      group.bench_with_input(
        BenchmarkId::new(format!("{}steps_{}iter", num_steps, iterations), *num_steps as u64 * *iterations),
        &pipeline,
        |b, pipeline| {
          b.iter_batched(
            || Values::new().with("counter", 0_u64),
            |initial| pipeline.run(initial).unwrap(),
            criterion::BatchSize::SmallInput,
          );
        },
      );
    }
  }
  group.finish();
}

fn bench_recovery_skipping(c: &mut Criterion) {
  let mut group = c.benchmark_group("RecoverySkipping");

  for num_skipped in [1, 10, 100].iter() {
    let mut steps = vec![Step::new("fail", &[], |_| Err::<(), _>(anyhow::anyhow!("bench failure")))];
    steps.extend((0..*num_skipped).map(|i| increment_step(format!("skipped_{}", i), 1)));
    steps.push(Step::new("handler", &["exc_info"], |_| Ok(())));
    let pipeline = Pipeline::new(steps).unwrap();

    group.throughput(Throughput::Elements(*num_skipped as u64));
    group.bench_with_input(BenchmarkId::from_parameter(*num_skipped), &pipeline, |b, pipeline| {
      b.iter_batched(
        || Values::new().with("counter", 0_u64),
        |initial| pipeline.run(initial).unwrap(),
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_collect_from_namespace(c: &mut Criterion) {
  let mut group = c.benchmark_group("CollectFromNamespace");

  for num_bindings in [10, 100].iter() {
    let namespace = (0..*num_bindings).rev().fold(Namespace::new("bench"), |ns, i| {
      let step = increment_step(format!("step_{}", i), 1).at("bench.rs", i as u32);
      if i % 3 == 0 {
        ns.bind(format!("_private_{}", i), step)
      } else {
        ns.define(step)
      }
    });

    group.bench_with_input(BenchmarkId::from_parameter(*num_bindings), &namespace, |b, namespace| {
      b.iter(|| criterion::black_box(Pipeline::from_namespace(namespace).unwrap()))
    });
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_simple_pipeline,
  bench_recovery_skipping,
  bench_collect_from_namespace
);
criterion_main!(benches);
