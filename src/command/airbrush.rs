use egui::{Color32, Pos2, Vec2};
use rand::Rng;

use crate::surface::{CompositeMode, Surface};

/// Scatters `count` droplets uniformly over the disk of `jet_diameter` centred on `center`.
pub fn spray<R: Rng + ?Sized>(rng: &mut R, center: Pos2, jet_diameter: f32, count: usize) -> Vec<Pos2> {
    let radius = jet_diameter.max(0.0) / 2.0;
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            // sqrt keeps the density uniform across the disk
            let distance = radius * rng.gen_range(0.0f32..=1.0).sqrt();
            center + Vec2::angled(angle) * distance
        })
        .collect()
}

/// A baked spray of droplets. The positions are chosen when the command is built,
/// so executing it again always paints the same pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct AirbrushCommand {
    color: Color32,
    droplet_diameter: f32,
    droplets: Vec<Pos2>,
}

impl AirbrushCommand {
    pub fn new(color: Color32, droplet_diameter: f32) -> Self {
        Self {
            color,
            droplet_diameter,
            droplets: Vec::new(),
        }
    }

    pub fn add_droplets(&mut self, droplets: impl IntoIterator<Item = Pos2>) {
        self.droplets.extend(droplets);
    }

    pub fn with_droplets(mut self, droplets: Vec<Pos2>) -> Self {
        self.droplets = droplets;
        self
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn droplet_diameter(&self) -> f32 {
        self.droplet_diameter
    }

    pub fn droplets(&self) -> &[Pos2] {
        &self.droplets
    }

    pub fn is_empty(&self) -> bool {
        self.droplets.is_empty()
    }

    pub fn execute(&self, surface: &mut Surface) {
        let radius = self.droplet_diameter / 2.0;
        for droplet in &self.droplets {
            surface.fill_circle(*droplet, radius, self.color, CompositeMode::SourceOver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spray_stays_inside_jet() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = pos2(50.0, 50.0);
        let droplets = spray(&mut rng, center, 30.0, 200);
        assert_eq!(droplets.len(), 200);
        assert!(droplets.iter().all(|d| d.distance(center) <= 15.0 + 1e-3));
    }

    #[test]
    fn test_spray_is_reproducible_for_a_seed() {
        let a = spray(&mut StdRng::seed_from_u64(42), pos2(0.0, 0.0), 10.0, 16);
        let b = spray(&mut StdRng::seed_from_u64(42), pos2(0.0, 0.0), 10.0, 16);
        assert_eq!(a, b);
    }
}
