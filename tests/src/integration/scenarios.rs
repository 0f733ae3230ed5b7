//! # Storage Scenarios
//!
//! Insert, extract and reset flows as a host drives them through slot views:
//!
//! 1. **Single resource**: bind, fill, drain, auto-reset
//! 2. **Attributes**: unlimited vending, void overflow, locks
//! 3. **Conversion chains**: one pool viewed at three rates

#[cfg(test)]
mod tests {
    use crate::{create_filled_group, create_iron_group, init_tracing, iron};
    use fractional_storage::{
        AttributeFlags, FractionalGroup, ItemDescriptor, LockKind, PoolConfig, Quantity,
        RecordingListener, StorageSlot, StorageSlotMut,
    };

    // =========================================================================
    // SINGLE RESOURCE
    // =========================================================================

    #[test]
    fn test_fill_and_drain_resets_pool() {
        init_tracing();
        let mut group = FractionalGroup::new(PoolConfig::for_testing()).unwrap();

        let mut slot = group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(ItemDescriptor::new("cobblestone")));
        assert!(slot.conversion_rate() > 0);

        assert_eq!(slot.adjust_stored_count(5), 0);
        assert_eq!(slot.stored_count(), Quantity::Finite(5));
        assert_eq!(slot.adjust_stored_count(-3), 0);
        assert_eq!(slot.stored_count(), Quantity::Finite(2));
        assert_eq!(slot.adjust_stored_count(-2), 0);

        for view in group.slots() {
            assert!(view.is_empty());
            assert_eq!(view.conversion_rate(), 0);
        }
        assert_eq!(group.pool().pooled_count(), 0);
    }

    #[test]
    fn test_only_base_slot_activates_without_policy() {
        let mut group = FractionalGroup::new(PoolConfig::for_testing()).unwrap();
        group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(ItemDescriptor::new("dirt")));

        assert!(group.slot(0).unwrap().is_enabled());
        assert!(!group.slot(1).unwrap().is_enabled());
        assert!(!group.slot(2).unwrap().is_enabled());
        assert_eq!(group.slot(1).unwrap().max_capacity(), Quantity::ZERO);
    }

    #[test]
    fn test_overfill_returns_rejected_part() {
        let mut group = create_filled_group("sand", 60);
        let mut slot = group.slot_mut(0).unwrap();

        assert_eq!(slot.adjust_stored_count(10), 6);
        assert_eq!(slot.stored_count(), Quantity::Finite(64));
        assert_eq!(slot.remaining_capacity(), Quantity::ZERO);
    }

    #[test]
    fn test_over_extraction_returns_shortfall_and_resets() {
        let mut group = create_filled_group("sand", 4);
        let mut slot = group.slot_mut(0).unwrap();

        assert_eq!(slot.adjust_stored_count(-10), 6);
        assert!(group.slot(0).unwrap().is_empty());
    }

    #[test]
    fn test_set_count_to_zero_resets() {
        let mut group = create_filled_group("gravel", 12);
        group.slot_mut(0).unwrap().set_stored_count(0);
        assert!(!group.pool().is_populated());
    }

    #[test]
    fn test_other_resource_rejected_while_populated() {
        let mut group = create_filled_group("sand", 1);
        let view = group.slot(0).unwrap();
        assert!(view.can_accept(&ItemDescriptor::new("sand")));
        assert!(!view.can_accept(&ItemDescriptor::new("gravel")));

        let slot = group
            .slot_mut(1)
            .unwrap()
            .set_stored_descriptor(Some(ItemDescriptor::new("gravel")));
        assert_eq!(slot.slot_index(), 1);
        assert!(slot.is_empty());
        assert!(!slot.is_enabled());
    }

    #[test]
    fn test_listener_sees_each_change() {
        let listener = RecordingListener::new();
        let mut group = FractionalGroup::new(PoolConfig::for_testing())
            .unwrap()
            .with_listener(listener.clone());

        let mut slot = group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(ItemDescriptor::new("clay")));
        slot.adjust_stored_count(8);
        slot.adjust_stored_count(-8);

        assert_eq!(listener.amount_changes(), 1);
        assert_eq!(listener.item_changes(), 2);
    }

    // =========================================================================
    // ATTRIBUTES
    // =========================================================================

    #[test]
    fn test_unlimited_vending_absorbs_everything() {
        let mut group = FractionalGroup::new(PoolConfig::for_testing())
            .unwrap()
            .with_attributes(AttributeFlags::default().with_unlimited_vending());
        let mut slot = group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(ItemDescriptor::new("cobblestone")));

        assert_eq!(slot.adjust_stored_count(100), 0);
        assert_eq!(slot.stored_count(), Quantity::Unbounded);
        assert_eq!(slot.remaining_capacity(), Quantity::Unbounded);
        assert_eq!(group.pool().pooled_count(), 0);
    }

    #[test]
    fn test_void_at_capacity_destroys_overflow() {
        let mut group = create_filled_group("cobblestone", 64);
        group.set_attributes(AttributeFlags::default().with_void());

        let mut slot = group.slot_mut(0).unwrap();
        assert_eq!(slot.adjust_stored_count(10), 0);
        assert_eq!(slot.stored_count(), Quantity::Finite(64));
    }

    #[test]
    fn test_populated_lock_keeps_binding_when_drained() {
        let mut group = create_filled_group("obsidian", 3);
        group.set_attributes(AttributeFlags::default().with_lock(LockKind::Populated));

        let mut slot = group.slot_mut(0).unwrap();
        assert_eq!(slot.adjust_stored_count(-3), 0);
        assert_eq!(slot.stored_count(), Quantity::ZERO);
        assert_eq!(slot.stored_descriptor(), Some(&ItemDescriptor::new("obsidian")));

        assert_eq!(slot.adjust_stored_count(2), 0);
        assert_eq!(slot.stored_count(), Quantity::Finite(2));
    }

    #[test]
    fn test_empty_lock_refuses_new_resources() {
        let group = FractionalGroup::<ItemDescriptor>::new(PoolConfig::for_testing())
            .unwrap()
            .with_attributes(AttributeFlags::default().with_lock(LockKind::Empty));

        assert!(!group.slot(0).unwrap().can_accept(&ItemDescriptor::new("dirt")));
    }

    #[test]
    fn test_unlimited_storage_has_no_ceiling() {
        let mut group = create_filled_group("netherrack", 1);
        group.set_attributes(AttributeFlags::default().with_unlimited_storage());

        let mut slot = group.slot_mut(0).unwrap();
        assert_eq!(slot.adjust_stored_count(1_000_000), 0);
        assert_eq!(slot.stored_count(), Quantity::Finite(1_000_001));
        assert_eq!(slot.max_capacity(), Quantity::Unbounded);
    }

    // =========================================================================
    // CONVERSION CHAINS
    // =========================================================================

    #[test]
    fn test_binding_ingot_populates_chain() {
        init_tracing();
        let mut group = create_iron_group(1);

        let slot = group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(iron("ingot")));
        assert_eq!(slot.slot_index(), 1);

        let rates: Vec<u32> = group.slots().map(|s| s.conversion_rate()).collect();
        assert_eq!(rates, vec![81, 9, 1]);
        assert_eq!(group.slot(0).unwrap().stored_descriptor(), Some(&iron("block")));
    }

    #[test]
    fn test_chain_counts_share_one_pool() {
        let mut group = create_iron_group(1);
        let mut slot = group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(iron("ingot")));
        assert_eq!(slot.adjust_stored_count(10), 0);

        let counts: Vec<Quantity> = group.slots().map(|s| s.stored_count()).collect();
        assert_eq!(
            counts,
            vec![Quantity::Finite(1), Quantity::Finite(10), Quantity::Finite(90)]
        );
    }

    #[test]
    fn test_chain_extraction_removes_pool_units() {
        let mut group = create_iron_group(1);
        let mut slot = group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(iron("ingot")));
        slot.adjust_stored_count(10);

        let mut block = group.slot_mut(0).unwrap();
        assert_eq!(block.adjust_stored_count(-1), 0);
        assert_eq!(group.pool().pooled_count(), 89);
    }

    #[test]
    fn test_chain_capacity_per_slot() {
        let mut group = create_iron_group(2);
        group
            .slot_mut(2)
            .unwrap()
            .set_stored_descriptor(Some(iron("nugget")));

        let caps: Vec<Quantity> = group.slots().map(|s| s.max_capacity()).collect();
        assert_eq!(
            caps,
            vec![
                Quantity::Finite(128),
                Quantity::Finite(128 * 9),
                Quantity::Finite(128 * 81)
            ]
        );
    }

    #[test]
    fn test_chain_fill_through_nuggets_caps_blocks() {
        let mut group = create_iron_group(1);
        let mut nugget = group
            .slot_mut(2)
            .unwrap()
            .set_stored_descriptor(Some(iron("nugget")));

        assert_eq!(nugget.adjust_stored_count(6000), 6000 - 64 * 81);
        assert_eq!(group.slot(0).unwrap().stored_count(), Quantity::Finite(64));
        assert_eq!(group.slot(1).unwrap().remaining_capacity(), Quantity::ZERO);
    }

    #[test]
    fn test_chain_equivalent_tags_accepted() {
        let mut group = create_iron_group(1);
        group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(iron("ingot")));

        let other_mod = ItemDescriptor::new("othermod:iron_ingot").with_tag("ingotIron");
        assert!(group.slot(1).unwrap().can_accept(&other_mod));
        assert!(group.slot(1).unwrap().can_release(&other_mod));
        assert!(!group.slot(0).unwrap().can_accept(&other_mod));
    }

    #[test]
    fn test_chain_drains_to_reset() {
        let mut group = create_iron_group(1);
        let mut slot = group
            .slot_mut(0)
            .unwrap()
            .set_stored_descriptor(Some(iron("nugget")));
        slot.adjust_stored_count(5);
        assert_eq!(slot.adjust_stored_count(-5), 0);

        assert!(group.slots().all(|s| s.is_empty() && s.is_enabled()));
    }

    #[test]
    fn test_unknown_resource_falls_back_to_base() {
        let mut group = create_iron_group(1);
        let slot = group
            .slot_mut(1)
            .unwrap()
            .set_stored_descriptor(Some(ItemDescriptor::new("gold_ingot")));

        assert_eq!(slot.slot_index(), 0);
        assert_eq!(slot.conversion_rate(), 1);
        assert!(!group.slot(1).unwrap().is_enabled());
    }
}
