//! Unit tests for tn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(4);
        assert_eq!(id.index(), 4);
        assert_eq!(NodeId::try_from(4usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(EdgeId(3).to_string(), "EdgeId(3)");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.uniform(0.9, 1.2), b.uniform(0.9, 1.2));
        }
    }

    #[test]
    fn uniform_stays_in_closed_range() {
        let mut rng = SimRng::new(1);
        for _ in 0..1_000 {
            let x = rng.uniform(0.9, 1.2);
            assert!((0.9..=1.2).contains(&x), "got {x}");
        }
    }

    #[test]
    fn zero_width_range_is_constant() {
        let mut rng = SimRng::new(99);
        assert_eq!(rng.uniform(1.0, 1.0), 1.0);
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(3);
        let mut a = root.child(0);
        let mut b = root.child(1);
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1_000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1_000)).collect();
        assert_ne!(xs, ys);
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, TrafficConfig};

    #[test]
    fn default_is_valid() {
        let c = TrafficConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.congestion_increment, 0.05);
        assert_eq!(c.congestion_decay, 0.95);
    }

    #[test]
    fn reversed_fluctuation_rejected() {
        let c = TrafficConfig { fluctuation_min: 1.2, fluctuation_max: 0.9, ..Default::default() };
        assert!(matches!(c.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn decay_above_one_rejected() {
        let c = TrafficConfig { congestion_decay: 1.5, ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rounding_to_cents() {
        let c = TrafficConfig::default();
        assert_eq!(c.round_weight(10.456), 10.46);
        assert_eq!(c.round_weight(7.0), 7.0);
    }

    #[test]
    fn unscalable_weight_passes_through() {
        let c = TrafficConfig::default();
        assert_eq!(c.round_weight(1e308), 1e308);
    }

    #[test]
    fn fluctuation_above_cap_rejected() {
        let c = TrafficConfig { fluctuation_max: 1e300, ..Default::default() };
        assert!(matches!(c.validate(), Err(CoreError::Config(_))));
        let c = TrafficConfig { fluctuation_max: TrafficConfig::MAX_FLUCTUATION, ..Default::default() };
        assert!(c.validate().is_ok());
    }
}
