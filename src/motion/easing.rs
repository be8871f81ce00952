/// Maps raw progress in `[0, 1]` to eased progress.
///
/// Every variant clamps its input and pins the endpoints: `apply(0) == 0`,
/// `apply(1) == 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
	/// Identity.
	Linear,
	/// `1 - (1 - t)^3`.
	EaseOutCubic,
	/// Cubic in, cubic out.
	EaseInOutCubic,
	/// CSS `cubic-bezier(x1, y1, x2, y2)`. All four controls are clamped to
	/// `[0, 1]`, so overshooting curves come out monotonic.
	CubicBezier(f64, f64, f64, f64),
}

impl Easing {
	/// The page-wide "spring-like" curve.
	pub const HOUSE: Easing = Easing::CubicBezier(0.16, 1.0, 0.3, 1.0);

	/// Eased value for `t`; NaN counts as 0.
	pub fn apply(self, t: f64) -> f64 {
		if !(t > 0.0) {
			return 0.0;
		}
		if t >= 1.0 {
			return 1.0;
		}
		match self {
			Easing::Linear => t,
			Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
			Easing::EaseInOutCubic => {
				if t < 0.5 {
					4.0 * t * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
				}
			}
			Easing::CubicBezier(x1, y1, x2, y2) => {
				let [x1, y1, x2, y2] = [x1, y1, x2, y2].map(|c| c.clamp(0.0, 1.0));
				let s = solve_bezier_x(t, x1, x2);
				bezier(s, y1, y2)
			}
		}
	}
}

impl Default for Easing {
	fn default() -> Self {
		Easing::HOUSE
	}
}

fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
	let u = 1.0 - s;
	3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
	let u = 1.0 - s;
	3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Finds the curve parameter whose x equals `x`. Newton first, bisection if
/// the slope flattens out.
fn solve_bezier_x(x: f64, x1: f64, x2: f64) -> f64 {
	const EPS: f64 = 1e-9;

	let mut s = x;
	for _ in 0..8 {
		let err = bezier(s, x1, x2) - x;
		if err.abs() < EPS {
			return s;
		}
		let slope = bezier_slope(s, x1, x2);
		if slope.abs() < 1e-6 {
			break;
		}
		s = (s - err / slope).clamp(0.0, 1.0);
	}

	let (mut lo, mut hi) = (0.0, 1.0);
	s = x;
	for _ in 0..64 {
		let v = bezier(s, x1, x2);
		if (v - x).abs() < EPS {
			break;
		}
		if v < x {
			lo = s;
		} else {
			hi = s;
		}
		s = (lo + hi) / 2.0;
	}
	s
}
