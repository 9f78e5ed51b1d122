use criterion::{black_box, criterion_group, criterion_main, Criterion};
use clear_bow::{Classifier, ClassifierType};

fn setup_benchmark_classifier(classifier_type: ClassifierType) -> Classifier {
    Classifier::builder()
        .with_classifier_type(classifier_type)
        .add_label("regulation", vec!["asic", "government", "federal", "tax"])
        .add_label("contribution", vec!["contribution", "concession", "personal", "after tax", "10%", "10.5%"])
        .add_label("covid", vec!["covid", "lockdown", "downturn", "effect"])
        .add_label("retirement", vec!["retire", "house", "annuity", "age"])
        .add_label("fund", vec!["unisuper", "aus super", "australian super", "sun super", "qsuper", "rest", "cbus"])
        .build()
}

fn bench_tally(c: &mut Criterion) {
    let classifier = setup_benchmark_classifier(ClassifierType::MultiClass);
    let mut group = c.benchmark_group("Tally");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("short_text", |b| b.iter(|| {
        classifier.label_word_count(black_box("Sun Super all the way")).unwrap()
    }));

    group.bench_function("long_text", |b| b.iter(|| {
        classifier.label_word_count(black_box(
            "Mate you get 15% tax on concessional contributions in super. So no surprise it adds up \
             to over 15%. Message from Covid 19: don't touch your face, don't touch your super. \
             It would be better than having an imaginary jetski that I can't use after the lockdown. \
             No but considering moving I'm with unisuper at the moment their a closed fund."
        )).unwrap()
    }));

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Prediction");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    for classifier_type in ClassifierType::ALL {
        let classifier = setup_benchmark_classifier(classifier_type);

        group.bench_function(format!("predict_{}", classifier_type), |b| b.iter(|| {
            classifier.predict(black_box(
                "Is the 'income' figure for this before or after tax?"
            )).unwrap()
        }));
    }

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaling");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Test scaling with number of labels
    let label_counts = [2, 5, 10, 20, 50];
    for &count in &label_counts {
        let mut builder = Classifier::builder();
        for i in 0..count {
            builder = builder.add_label(
                format!("label_{}", i),
                (0..20).map(|w| format!("word{}x{}", i, w)),
            );
        }
        let classifier = builder.build();

        group.bench_function(format!("labels_{}", count), |b| b.iter(|| {
            classifier.predict(black_box("Test text for scaling benchmark with word3x7 inside")).unwrap()
        }));
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tally,
    bench_prediction,
    bench_scaling
);
criterion_main!(benches);
