use std::collections::BTreeMap;

use crate::{
    fitting::fitter::Fitter,
    snapshot::{body::BodySnapshot, transform::Transform, world::WorldSnapshot},
};

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear position, normalized-linear rotation along the shortest arc
#[derive(Clone, Copy, Debug, Default)]
pub struct TransformFitter;

impl Fitter<Transform> for TransformFitter {
    fn fit(&self, a: &Transform, b: &Transform, t: f64) -> Transform {
        let t = t as f32;

        let mut position = [0.0; 3];
        for (i, value) in position.iter_mut().enumerate() {
            *value = lerp(a.position[i], b.position[i], t);
        }

        let dot: f32 = a.rotation.iter().zip(&b.rotation).map(|(a, b)| a * b).sum();
        let sign = if dot < 0.0 { -1.0 } else { 1.0 };

        let mut rotation = [0.0; 4];
        for (i, value) in rotation.iter_mut().enumerate() {
            *value = lerp(a.rotation[i], sign * b.rotation[i], t);
        }

        let length = rotation.iter().map(|c| c * c).sum::<f32>().sqrt();
        if length > f32::EPSILON {
            for value in &mut rotation {
                *value /= length;
            }
        } else {
            rotation = a.rotation;
        }

        Transform { position, rotation }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BodyFitter {
    transform: TransformFitter,
}

impl Fitter<BodySnapshot> for BodyFitter {
    fn fit(&self, a: &BodySnapshot, b: &BodySnapshot, t: f64) -> BodySnapshot {
        BodySnapshot {
            head: self.transform.fit(&a.head, &b.head, t),
            left_hand: self.transform.fit(&a.left_hand, &b.left_hand, t),
            right_hand: self.transform.fit(&a.right_hand, &b.right_hand, t),
        }
    }
}

/// Fits players present on both sides. A player present on one side only is
/// kept if that side is the nearer one.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorldFitter {
    body: BodyFitter,
}

impl Fitter<WorldSnapshot> for WorldFitter {
    fn fit(&self, a: &WorldSnapshot, b: &WorldSnapshot, t: f64) -> WorldSnapshot {
        let nearer_is_b = t >= 0.5;
        let mut players = BTreeMap::new();

        for (id, body_a) in &a.players {
            match b.players.get(id) {
                Some(body_b) => {
                    players.insert(*id, self.body.fit(body_a, body_b, t));
                }
                None if !nearer_is_b => {
                    players.insert(*id, *body_a);
                }
                None => {}
            }
        }

        if nearer_is_b {
            for (id, body_b) in &b.players {
                players.entry(*id).or_insert(*body_b);
            }
        }

        WorldSnapshot { players }
    }
}
