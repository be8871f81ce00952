use glam::DVec2;
use xai_landing::components::constellation::{ConstellationConfig, ConstellationState};
use xai_landing::motion::{
	AnimationContext, ChaosConfig, CycleConfig, Dimensions, Drift, Easing, Layout, Node,
	PIPELINE_NODE_COUNT, Pointer, Repulsion, ScheduleMode, Scheduler, chaos_layout, interpolate,
	pipeline_layout, repel, sample_cycle,
};

fn still(layout: &Layout<DVec2>) -> Layout<DVec2> {
	Layout::new(
		layout
			.nodes()
			.iter()
			.map(|n| Node {
				drift: Drift::NONE,
				..*n
			})
			.collect(),
	)
}

#[test]
fn halfway_is_the_midpoint_of_chaos_and_pipeline() {
	let dims = Dimensions::new(960.0, 480.0);
	let chaos = still(&chaos_layout(11, PIPELINE_NODE_COUNT, dims, &ChaosConfig::default()).unwrap());
	let pipeline = pipeline_layout(dims).unwrap();
	assert_eq!(chaos.len(), 11);
	assert_eq!(pipeline.len(), 11);

	let mut out = Vec::new();
	interpolate(&chaos, &pipeline, 0.5, 42.0, &mut out);
	repel(&mut out, Pointer::Away, &Repulsion::default());

	for ((a, b), p) in chaos.positions().zip(pipeline.positions()).zip(&out) {
		let mid = (a + b) / 2.0;
		assert!(p.distance(mid) < 1e-9, "{p} != {mid}");
	}
}

#[test]
fn same_seed_and_size_give_identical_layouts() {
	let dims = Dimensions::new(800.0, 420.0);
	let config = ChaosConfig::default();
	let a = chaos_layout(99, 11, dims, &config).unwrap();
	let b = chaos_layout(99, 11, dims, &config).unwrap();
	for (p, q) in a.positions().zip(b.positions()) {
		assert_eq!(p.x.to_bits(), q.x.to_bits());
		assert_eq!(p.y.to_bits(), q.y.to_bits());
	}
}

#[test]
fn autonomous_cycle_hits_its_marks() {
	let config = CycleConfig::default();
	let mut scheduler = Scheduler::new(ScheduleMode::Autonomous(config), Easing::HOUSE);
	let mut ctx = AnimationContext::new();

	let formed = scheduler.tick(&mut ctx, config.gather).unwrap();
	assert!((formed.progress - 1.0).abs() < 1e-9);
	assert!((formed.eased - 1.0).abs() < 1e-9);

	let scattered = scheduler
		.tick(&mut ctx, config.hold_formed + config.scatter)
		.unwrap();
	assert!(scattered.progress.abs() < 1e-9);

	let later = sample_cycle(&config, config.cycle_length() + config.gather);
	assert!((later.progress - 1.0).abs() < 1e-9);
}

#[test]
fn teardown_stops_buffer_writes() {
	let mut state = ConstellationState::new(ConstellationConfig::default(), 800.0, 420.0);
	for _ in 0..5 {
		assert!(state.frame(1.0 / 60.0));
	}
	assert_eq!(state.mutations(), 5);

	state.teardown();
	assert!(state.is_torn_down());
	for _ in 0..30 {
		state.frame(1.0 / 60.0);
	}
	assert_eq!(state.mutations(), 5);
}

#[test]
fn pointer_only_disturbs_nodes_in_reach() {
	let rep = Repulsion {
		radius: 50.0,
		force: 20.0,
	};
	let near = DVec2::new(110.0, 100.0);
	let far = DVec2::new(400.0, 400.0);
	let mut positions = vec![near, far];
	repel(&mut positions, Pointer::At(DVec2::new(100.0, 100.0)), &rep);

	assert!(positions[0].x > near.x);
	assert!((positions[0].y - near.y).abs() < 1e-12);
	assert_eq!(positions[1], far);
}
