use criterion::{black_box, criterion_group, criterion_main, Criterion};
use face_enroll::capture::{CaptureDebouncer, CaptureState};
use face_enroll::detection::{BoundingBox, Face, LandmarkSet, Point2};
use face_enroll::direction::{Direction, DirectionClassifier};
use face_enroll::pose_estimation::{Pose, PoseEstimator};
use face_enroll::video::{SyntheticSource, VideoSource};

fn reference_landmarks() -> LandmarkSet {
    let ring = |cx: f64, cy: f64| {
        vec![
            Point2 { x: cx - 5.0, y: cy },
            Point2 { x: cx + 5.0, y: cy },
            Point2 { x: cx, y: cy - 3.0 },
            Point2 { x: cx, y: cy + 3.0 },
        ]
    };
    LandmarkSet {
        nose: vec![
            Point2 { x: 120.0, y: 104.0 },
            Point2 { x: 120.0, y: 107.0 },
            Point2 { x: 120.0, y: 109.0 },
            Point2 { x: 120.0, y: 110.0 },
            Point2 { x: 120.0, y: 118.0 },
            Point2 { x: 120.0, y: 125.0 },
            Point2 { x: 120.0, y: 130.0 },
        ],
        left_eye: ring(100.0, 100.0),
        right_eye: ring(140.0, 100.0),
    }
}

fn bench_pose_estimation(c: &mut Criterion) {
    let estimator = PoseEstimator::new(false);
    let landmarks = reference_landmarks();

    c.bench_function("estimate_pose", |b| {
        b.iter(|| estimator.estimate(black_box(&landmarks)))
    });
}

fn bench_direction_classification(c: &mut Criterion) {
    let classifier = DirectionClassifier::default();
    let poses: Vec<Pose> = (-30..=30)
        .flat_map(|yaw| {
            (-20..=160).step_by(10).map(move |pitch| Pose {
                yaw: f64::from(yaw),
                pitch: f64::from(pitch),
            })
        })
        .collect();

    c.bench_function("classify_pose_grid", |b| {
        b.iter(|| {
            for pose in &poses {
                black_box(classifier.classify(black_box(*pose)));
            }
        })
    });
}

fn bench_capture_render(c: &mut Criterion) {
    let debouncer = CaptureDebouncer::default();
    let mut source = SyntheticSource::new(720, 560);
    let frame = source.frame().unwrap();
    let face = Face {
        bbox: BoundingBox {
            x: 200.0,
            y: 150.0,
            width: 260.0,
            height: 260.0,
        },
        landmarks: reference_landmarks(),
    };

    // Fresh state per iteration so the debounce gate never short-circuits
    // the crop/resize/encode path being measured
    c.bench_function("render_capture_224", |b| {
        b.iter(|| {
            let mut state = CaptureState::new(Direction::Straight, 100);
            debouncer
                .on_tick(
                    black_box(&face),
                    black_box(&frame),
                    Direction::Straight,
                    1_000,
                    &mut state,
                )
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_pose_estimation,
    bench_direction_classification,
    bench_capture_render
);
criterion_main!(benches);
