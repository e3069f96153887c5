use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use survey_diagram::bus::{ImageOverlayBus, SurveyDataBus};
use survey_diagram::core::{DiagramGeometry, IconOrientation, PlacedIcon, SurveyData, reconcile};
use survey_diagram::interaction::{
    DialogInitialValues, DialogRequest, DialogResult, DialogStatus, DraggedItem, DropEvent,
    EditDialog,
};
use survey_diagram::{DiagramBinding, DiagramConfig, SurveyDiagram};

struct NullDialog;

impl EditDialog for NullDialog {
    fn set_initial_values(&mut self, _values: &DialogInitialValues) {}
    fn set_intersection(&mut self, _intersection: bool) {}
    fn open(&mut self, _request: &DialogRequest) {}
}

fn survey(index: i64) -> SurveyData {
    SurveyData::new()
        .with_stones(index % 40, (index * 7) % 40)
        .with_distances((index * 137) % 4_000, (index * 53) % 900)
        .with_plot(20 + index % 30, 15)
        .with_positions(1 + index % 2, 1 + (index / 2) % 2)
}

fn bench_reconcile_all_rules(c: &mut Criterion) {
    let measurements: Vec<_> = (0..64)
        .map(|i| survey(i).measurements().expect("valid survey"))
        .collect();

    c.bench_function("reconcile_64_surveys", |b| {
        b.iter(|| {
            for m in &measurements {
                let _ = reconcile(black_box(m), black_box(DiagramGeometry::default()));
            }
        })
    });
}

fn bench_bus_round_trip(c: &mut Criterion) {
    let survey_bus = SurveyDataBus::new();
    let diagram = SurveyDiagram::new(DiagramConfig::default()).expect("diagram");
    let _binding =
        DiagramBinding::attach(diagram, survey_bus.clone(), ImageOverlayBus::new(), NullDialog);
    let mut index = 0;

    c.bench_function("survey_bus_publish_and_echo", |b| {
        b.iter(|| {
            index += 1;
            survey_bus.publish(black_box(survey(index)));
        })
    });
}

fn bench_drop_100_icons(c: &mut Criterion) {
    let icons: Vec<PlacedIcon> = (0..100)
        .map(|i| PlacedIcon {
            image_index: i,
            image_distance: i as f64 * 10.0,
            image_orientation: IconOrientation::ONE,
            image_width: 2.0,
            image_margin: 45,
            image_pos: 0,
            image_name: format!("ICON{i}"),
            road_length: 1.0,
        })
        .collect();
    let mut diagram =
        SurveyDiagram::new(DiagramConfig::default().with_drag_enabled(true)).expect("diagram");
    diagram.load_icons(&icons);
    let item = DraggedItem::new("roadComponents culvert", "culvert");
    let answer = DialogResult::new(DialogStatus::Update).with_distance(75.0);

    c.bench_function("move_icon_in_100", |b| {
        b.iter(|| {
            diagram
                .begin_drop(DropEvent::within_canvas(0, 99, item.clone()))
                .expect("drop accepted");
            let _ = diagram.finish_drop(black_box(Some(&answer)));
        })
    });
}

criterion_group!(
    benches,
    bench_reconcile_all_rules,
    bench_bus_round_trip,
    bench_drop_100_icons
);
criterion_main!(benches);
