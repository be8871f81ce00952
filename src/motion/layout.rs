use glam::{DVec2, DVec3};

/// Per-node ambient oscillation, fixed when the node is created.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Drift {
	/// Peak offset.
	pub amplitude: f64,
	/// Starting angle in radians.
	pub phase: f64,
	/// Angular speed in radians per second.
	pub speed: f64,
}

impl Drift {
	/// A node that holds still.
	pub const NONE: Drift = Drift {
		amplitude: 0.0,
		phase: 0.0,
		speed: 0.0,
	};
}

/// One node of a layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node<P> {
	/// Position in its layout; also its identity across layouts.
	pub index: usize,
	/// Resting position before drift.
	pub position: P,
	/// Ambient motion while chaotic.
	pub drift: Drift,
}

/// Ordered node positions. Index `i` in a chaos layout and index `i` in a
/// target layout are the same node.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout<P> {
	nodes: Vec<Node<P>>,
}

impl<P> Default for Layout<P> {
	fn default() -> Self {
		Self { nodes: Vec::new() }
	}
}

impl<P: Copy> Layout<P> {
	/// Wraps already-indexed nodes.
	pub fn new(nodes: Vec<Node<P>>) -> Self {
		Self { nodes }
	}

	/// Builds a static layout (no drift) from bare positions.
	pub fn from_positions(positions: impl IntoIterator<Item = P>) -> Self {
		let nodes = positions
			.into_iter()
			.enumerate()
			.map(|(index, position)| Node {
				index,
				position,
				drift: Drift::NONE,
			})
			.collect();
		Self { nodes }
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when the layout has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Nodes in index order.
	pub fn nodes(&self) -> &[Node<P>] {
		&self.nodes
	}

	/// Node `index`, if present.
	pub fn get(&self, index: usize) -> Option<&Node<P>> {
		self.nodes.get(index)
	}

	/// Resting positions in index order.
	pub fn positions(&self) -> impl Iterator<Item = P> + '_ {
		self.nodes.iter().map(|n| n.position)
	}
}

/// Measured container size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Dimensions {
	/// A `width` × `height` container.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Zero, negative or non-finite sizes can't hold a layout.
	pub fn is_degenerate(&self) -> bool {
		!(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
	}

	/// Point at fractions `fx`, `fy` of the container.
	pub fn scale(&self, fx: f64, fy: f64) -> DVec2 {
		DVec2::new(self.width * fx, self.height * fy)
	}
}

/// An edge between two node indices. Endpoints are read from the live
/// position buffer, edges never move on their own.
pub type Edge = (usize, usize);

/// Memoizes the chaos/target layout pair by dimension key.
///
/// Regenerates only when the measured size changes, and keeps the last good
/// pair when the new size is degenerate.
pub struct LayoutCache<P> {
	dims: Option<Dimensions>,
	chaos: Layout<P>,
	target: Layout<P>,
	generations: u64,
}

impl<P: Copy> LayoutCache<P> {
	/// An empty cache; the first `update` always builds.
	pub fn new() -> Self {
		Self {
			dims: None,
			chaos: Layout::default(),
			target: Layout::default(),
			generations: 0,
		}
	}

	/// Returns `true` if the layouts were regenerated.
	pub fn update<F>(&mut self, dims: Dimensions, build: F) -> bool
	where
		F: FnOnce(Dimensions) -> Option<(Layout<P>, Layout<P>)>,
	{
		if self.dims == Some(dims) {
			return false;
		}
		if dims.is_degenerate() {
			log::debug!(
				"skipping layout for degenerate size {}x{}",
				dims.width,
				dims.height
			);
			return false;
		}
		let Some((chaos, target)) = build(dims) else {
			log::debug!("layout builder declined {}x{}", dims.width, dims.height);
			return false;
		};
		self.chaos = chaos;
		self.target = target;
		self.dims = Some(dims);
		self.generations += 1;
		true
	}

	/// Size the current pair was built for.
	pub fn dims(&self) -> Option<Dimensions> {
		self.dims
	}

	/// Scattered layout for the cached size.
	pub fn chaos(&self) -> &Layout<P> {
		&self.chaos
	}

	/// Organized layout for the cached size.
	pub fn target(&self) -> &Layout<P> {
		&self.target
	}

	/// How many times the pair has been built.
	pub fn generations(&self) -> u64 {
		self.generations
	}
}

impl<P: Copy> Default for LayoutCache<P> {
	fn default() -> Self {
		Self::new()
	}
}

/// Positions that can be drifted and interpolated.
pub trait Position: Copy {
	/// Linear blend toward `target` by `t`.
	fn lerp_to(self, target: Self, t: f64) -> Self;

	/// Ambient offset for `drift` at `time`, before any scaling by progress.
	fn drift_offset(drift: &Drift, time: f64) -> Self;

	/// `self + offset * scale`.
	fn add_scaled(self, offset: Self, scale: f64) -> Self;
}

impl Position for DVec2 {
	fn lerp_to(self, target: Self, t: f64) -> Self {
		self + (target - self) * t
	}

	fn drift_offset(drift: &Drift, time: f64) -> Self {
		let angle = time * drift.speed + drift.phase;
		DVec2::new(angle.sin(), (angle * 0.8).cos()) * drift.amplitude
	}

	fn add_scaled(self, offset: Self, scale: f64) -> Self {
		self + offset * scale
	}
}

impl Position for DVec3 {
	fn lerp_to(self, target: Self, t: f64) -> Self {
		self + (target - self) * t
	}

	fn drift_offset(drift: &Drift, time: f64) -> Self {
		let angle = time * drift.speed + drift.phase;
		DVec3::new(
			angle.sin(),
			(angle * 1.4).cos(),
			(angle * 0.5).sin() * 0.5,
		) * drift.amplitude
	}

	fn add_scaled(self, offset: Self, scale: f64) -> Self {
		self + offset * scale
	}
}
