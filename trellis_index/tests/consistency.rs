// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized add/move/remove sequences checked against the linear backend.

use std::collections::BTreeMap;

use kurbo::{Point, Rect};
use trellis_index::{FlatVec, QuadTreeConfig, SpatialIndex};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1_u64 << 53) as f64)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

fn random_rect(rng: &mut Rng, spread: f64) -> Rect {
    let x = (rng.next_f64() - 0.5) * spread;
    let y = (rng.next_f64() - 0.5) * spread;
    let w = rng.next_f64() * 80.0;
    let h = rng.next_f64() * 80.0;
    Rect::new(x, y, x + w, y + h)
}

fn sorted(mut v: Vec<u32>) -> Vec<u32> {
    v.sort_unstable();
    v
}

#[test]
fn quadtree_matches_flat_backend_under_churn() {
    let config = QuadTreeConfig {
        leaf_capacity: 4,
        max_depth: 6,
        initial_extent: 256.0,
    };
    let mut quad = SpatialIndex::new(config);
    let mut flat = SpatialIndex::with_backend(FlatVec::default());
    let mut live: BTreeMap<u32, Rect> = BTreeMap::new();
    let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
    let mut next_key = 0_u32;

    for step in 0..2_000 {
        // Let the world grow over time so the root has to expand.
        let spread = 200.0 + f64::from(step) * 5.0;
        match rng.below(10) {
            0..=4 => {
                let aabb = random_rect(&mut rng, spread);
                quad.insert(next_key, aabb);
                flat.insert(next_key, aabb);
                live.insert(next_key, aabb);
                next_key += 1;
            }
            5..=7 if !live.is_empty() => {
                let nth = rng.below(live.len() as u64) as usize;
                let key = *live.keys().nth(nth).expect("in range");
                let aabb = random_rect(&mut rng, spread);
                assert!(quad.update(&key, aabb));
                assert!(flat.update(&key, aabb));
                live.insert(key, aabb);
            }
            _ if !live.is_empty() => {
                let nth = rng.below(live.len() as u64) as usize;
                let key = *live.keys().nth(nth).expect("in range");
                assert_eq!(quad.remove(&key), live.remove(&key));
                flat.remove(&key);
            }
            _ => {}
        }

        if step % 50 == 0 {
            let probe = Point::new(
                (rng.next_f64() - 0.5) * spread * 0.5,
                (rng.next_f64() - 0.5) * spread * 0.5,
            );
            assert_eq!(quad.hit_test(probe), flat.hit_test(probe), "step {step}");

            let region = random_rect(&mut rng, spread).inflate(100.0, 100.0);
            assert_eq!(
                sorted(quad.query(region)),
                sorted(flat.query(region)),
                "step {step}"
            );
        }
    }

    assert_eq!(quad.len(), live.len());
    assert_eq!(quad.debug_info().total_items, live.len());

    // A region covering the whole world returns exactly the live keys.
    let everything = Rect::new(-1e9, -1e9, 1e9, 1e9);
    let expected: Vec<u32> = live.keys().copied().collect();
    assert_eq!(sorted(quad.visible_in_region(everything)), expected);
}

#[test]
fn dense_cluster_stays_within_depth_bound() {
    let config = QuadTreeConfig {
        leaf_capacity: 2,
        max_depth: 5,
        initial_extent: 1024.0,
    };
    let mut index = SpatialIndex::new(config);
    let mut rng = Rng(0xC1A5_7E55_9999_ABCD);
    for key in 0..500_u32 {
        let x = rng.next_f64() * 4.0;
        let y = rng.next_f64() * 4.0;
        index.insert(key, Rect::new(x, y, x + 0.25, y + 0.25));
    }

    let info = index.debug_info();
    assert!(info.height <= config.max_depth + 1);
    assert_eq!(info.root.expect("non-empty").subtree_items(), 500);
    assert_eq!(
        index.query(Rect::new(-1.0, -1.0, 10.0, 10.0)).len(),
        500,
        "every clustered item is found"
    );
}
