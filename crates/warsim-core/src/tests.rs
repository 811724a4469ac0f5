#[cfg(test)]
mod tests {
    use crate::commands::{Command, FireCommand, MoveCommand};
    use crate::components::*;
    use crate::config::*;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::{EventSink, RecordingSink, SimEvent};
    use crate::state::WorldState;
    use crate::types::*;

    fn tank(id: u64, faction: i32, lat: f64, lon: f64) -> Unit {
        Unit::new(
            UnitId(id),
            format!("Tank {id}"),
            UnitKind::Vehicle {
                ground_speed_mps: Some(10.0),
                crew: Some(4),
            },
            "MainBattleTank",
            FactionId(faction),
            GeoPosition::new(lat, lon),
        )
    }

    fn sample_damage_table() -> DamageTable {
        serde_json::from_str(
            r#"{
                "damageMultipliers": [
                    { "projectileType": "Shell", "targetCategory": "Land", "targetSubcategory": "", "multiplier": 1.5 },
                    { "projectileType": "shell", "targetCategory": "land", "targetSubcategory": "mainbattletank", "multiplier": 0.8 },
                    { "projectileType": "Bullet", "targetCategory": "Land", "multiplier": 0.2 }
                ],
                "armorValues": [
                    { "unitCategory": "Land", "unitSubcategory": "", "armorPoints": 20 },
                    { "unitCategory": "Land", "unitSubcategory": "MainBattleTank", "armorPoints": 100 }
                ]
            }"#,
        )
        .unwrap()
    }

    // --- Geography ---

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = GeoPosition::new(0.0, 0.0);
        let b = GeoPosition::new(1.0, 0.0);
        assert!((a.distance_to(&b) - METERS_PER_DEGREE_LAT).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPosition::new(10.0, 10.0);
        assert!(origin.bearing_to(&GeoPosition::new(10.1, 10.0)).abs() < 1e-6);
        assert!((origin.bearing_to(&GeoPosition::new(10.0, 10.1)) - 90.0).abs() < 0.1);
        assert!((origin.bearing_to(&GeoPosition::new(9.9, 10.0)) - 180.0).abs() < 1e-6);
        assert!((origin.bearing_to(&GeoPosition::new(10.0, 9.9)) - 270.0).abs() < 0.1);
    }

    #[test]
    fn test_advance_north_one_second() {
        let start = GeoPosition::new(0.0, 0.0);
        let end = start.advanced(0.0, 10.0);
        assert!((end.latitude - 10.0 / METERS_PER_DEGREE_LAT).abs() < 1e-12);
        assert!(end.longitude.abs() < 1e-12);
    }

    #[test]
    fn test_advance_at_pole_keeps_longitude() {
        let pole = GeoPosition::new(90.0, 45.0);
        let moved = pole.advanced(90.0, 100.0);
        assert!(moved.is_finite());
        assert_eq!(moved.longitude, 45.0);
    }

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert!((normalize_heading(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_heading(725.0) - 5.0).abs() < 1e-9);
        assert!(normalize_heading(-1e-20) < 360.0);
    }

    // --- Units ---

    #[test]
    fn test_ship_speed_converts_knots() {
        let kind = UnitKind::Ship {
            speed_knots: Some(20.0),
            crew: None,
        };
        assert!((kind.speed_mps() - 20.0 * KNOTS_TO_MPS).abs() < 1e-9);
        assert_eq!(kind.category(), UnitCategory::Sea);
    }

    #[test]
    fn test_structure_has_no_speed() {
        let mut kind = UnitKind::Structure;
        kind.set_native_speed(50.0);
        assert_eq!(kind.native_speed(), None);
        assert_eq!(kind.speed_mps(), 0.0);
    }

    #[test]
    fn test_apply_damage_clamps_and_destroys() {
        let mut unit = tank(1, 1, 0.0, 0.0);
        assert!(!unit.apply_damage(40.0));
        assert_eq!(unit.health, 60.0);
        assert!(unit.apply_damage(500.0));
        assert_eq!(unit.health, 0.0);
        assert_eq!(unit.status, UnitStatus::Destroyed);
        // Already destroyed: not reported twice
        assert!(!unit.apply_damage(10.0));
        assert_eq!(unit.health, 0.0);
    }

    #[test]
    fn test_unit_without_weapons_always_fires() {
        let mut unit = tank(1, 1, 0.0, 0.0);
        assert!(unit.consume_round(None));
        assert!(unit.consume_round(Some(3)));
        assert_eq!(unit.ammo_fraction(), 1.0);
    }

    #[test]
    fn test_named_slot_pays_for_the_shot() {
        let mut unit = tank(1, 1, 0.0, 0.0);
        unit.weapons.push(WeaponSlot::full("cannon", 1, 1, 10, 3.0));
        unit.weapons.push(WeaponSlot::full("mg", 1, 30, 300, 3.0));

        assert!(unit.consume_round(Some(1)));
        assert_eq!(unit.weapons[0].current_magazine, 1);
        assert_eq!(unit.weapons[1].current_magazine, 29);

        assert!(unit.consume_round(Some(0)));
        assert!(unit.weapons[0].is_reloading());
        // The reloading cannon refuses even though the mg could fire.
        assert!(!unit.consume_round(Some(0)));
        assert!(!unit.consume_round(Some(7)));
        assert_eq!(unit.weapons[1].current_magazine, 29);

        // Unnamed shots fall through to the first ready slot.
        assert!(unit.consume_round(None));
        assert_eq!(unit.weapons[1].current_magazine, 28);
        assert_eq!(unit.ready_weapon().map(|(index, _)| index), Some(1));
    }

    #[test]
    fn test_ammo_totals_saturate() {
        let mut unit = tank(1, 1, 0.0, 0.0);
        let mut slot = WeaponSlot::full("flak", 1, u32::MAX, u32::MAX, 1.0);
        slot.current_ammo = u32::MAX;
        slot.max_ammo = u32::MAX;
        assert_eq!(slot.rounds(), u32::MAX);
        assert_eq!(slot.capacity(), u32::MAX);

        unit.weapons.push(slot.clone());
        unit.weapons.push(slot);
        assert_eq!(unit.ammo_fraction(), 1.0);
    }

    #[test]
    fn test_weapon_slot_reload_cycle() {
        let mut slot = WeaponSlot::full("cannon", 1, 2, 5, 3.0);
        assert_eq!(slot.current_magazine, 2);
        assert_eq!(slot.current_ammo, 3);

        assert!(slot.consume_round());
        assert!(slot.consume_round());
        assert!(slot.is_reloading());
        assert!(!slot.consume_round(), "cannot fire while reloading");

        slot.advance_reload(2.0);
        assert!(slot.is_reloading());
        slot.advance_reload(1.5);
        assert!(!slot.is_reloading());
        assert_eq!(slot.current_magazine, 2);
        assert_eq!(slot.current_ammo, 1);
    }

    #[test]
    fn test_weapon_slot_runs_dry() {
        let mut slot = WeaponSlot::full("rifle", 1, 1, 1, 2.0);
        assert!(slot.consume_round());
        assert!(!slot.is_reloading(), "no reserve left to reload from");
        assert!(!slot.consume_round());
        assert_eq!(slot.rounds(), 0);

        slot.refill();
        assert!(slot.can_fire());
    }

    #[test]
    fn test_ammo_fraction() {
        let mut unit = tank(1, 1, 0.0, 0.0);
        unit.weapons.push(WeaponSlot::full("cannon", 1, 10, 40, 5.0));
        assert_eq!(unit.ammo_fraction(), 1.0);
        for _ in 0..10 {
            assert!(unit.consume_round(None));
        }
        assert!((unit.ammo_fraction() - 0.75).abs() < 1e-9);
    }

    // --- Factions ---

    #[test]
    fn test_hostility_is_directed() {
        let mut blue = Faction::new(FactionId(1), "Blue", "#0000FF");
        blue.allies.push(FactionId(2));
        let red = Faction::new(FactionId(2), "Red", "#FF0000");
        let factions = vec![blue, red];

        assert!(!is_hostile(&factions, FactionId(1), FactionId(2)));
        assert!(is_hostile(&factions, FactionId(2), FactionId(1)));
        assert!(!is_hostile(&factions, FactionId(2), FactionId(2)));
        // Unknown faction allies with no one
        assert!(is_hostile(&factions, FactionId(9), FactionId(1)));
    }

    #[test]
    fn test_nearest_hostile_skips_friends_and_wrecks() {
        let observer = tank(1, 1, 0.0, 0.0);
        let friend = tank(2, 1, 0.0, 0.001);
        let mut wreck = tank(3, 2, 0.0, 0.002);
        wreck.apply_damage(MAX_HEALTH);
        let far = tank(4, 2, 0.0, 0.01);
        let near = tank(5, 2, 0.0, 0.005);
        let state = WorldState::new(
            vec![observer.clone(), friend, wreck, far, near],
            Vec::new(),
            vec![
                Faction::new(FactionId(1), "Blue", "#0000FF"),
                Faction::new(FactionId(2), "Red", "#FF0000"),
            ],
            0,
        );

        let (target, distance) = state.nearest_hostile(&observer, 5000.0).unwrap();
        assert_eq!(target.id, UnitId(5));
        assert!(distance > 500.0 && distance < 600.0);

        assert!(state.nearest_hostile(&observer, 100.0).is_none());
        assert_eq!(state.hostiles_within(&observer, 5000.0).count(), 2);
    }

    // --- Commands and events ---

    #[test]
    fn test_command_unit() {
        let mv = Command::Move(MoveCommand::heading_and_speed(UnitId(3), 90.0, 5.0));
        let fire = Command::Fire(FireCommand {
            unit: UnitId(4),
            kind: ProjectileKind::Shell,
            heading: 0.0,
            speed_mps: 250.0,
            damage: 50.0,
            range_m: 4000.0,
            slot: Some(0),
            target: None,
        });
        assert_eq!(mv.unit(), UnitId(3));
        assert_eq!(fire.unit(), UnitId(4));
    }

    #[test]
    fn test_recording_sink_drain() {
        let sink = RecordingSink::new();
        sink.emit(SimEvent::CommandDropped {
            unit: UnitId(1),
            reason: "destroyed".into(),
        });
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_projectile_kind_parse_case_insensitive() {
        assert_eq!(ProjectileKind::parse("missile"), Some(ProjectileKind::Missile));
        assert_eq!(ProjectileKind::parse("SHELL"), Some(ProjectileKind::Shell));
        assert_eq!(ProjectileKind::parse("laser"), None);
    }

    #[test]
    fn test_projectile_goes_stale() {
        let mut projectile = Projectile {
            id: ProjectileId(1),
            position: GeoPosition::new(0.0, 0.0),
            heading: 0.0,
            speed_mps: 400.0,
            damage: 10.0,
            owner: UnitId(1),
            payload: ProjectilePayload::Bullet {
                caliber_mm: BULLET_CALIBER_MM,
            },
            range_remaining_m: 1.0,
        };
        assert!(!projectile.is_spent());

        projectile.range_remaining_m = 0.0;
        assert!(projectile.is_spent());

        projectile.range_remaining_m = 1e9;
        projectile.position = GeoPosition::new(90.5, 0.0);
        assert!(projectile.is_spent(), "past the pole");
    }

    // --- Config tables ---

    #[test]
    fn test_damage_exact_subcategory_wins() {
        let table = sample_damage_table();
        let mbt = tank(1, 1, 0.0, 0.0);
        assert_eq!(table.multiplier(ProjectileKind::Shell, &mbt), 0.8);
        assert_eq!(table.armor(&mbt), 100.0);
        // 50 * 0.8 - 100 * 0.1 = 30
        assert!((table.calculate_damage(ProjectileKind::Shell, &mbt, 50.0) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_damage_category_fallback() {
        let table = sample_damage_table();
        let mut apc = tank(1, 1, 0.0, 0.0);
        apc.subcategory = "APC".into();
        assert_eq!(table.multiplier(ProjectileKind::Shell, &apc), 1.5);
        assert_eq!(table.armor(&apc), 20.0);
        // 50 * 1.5 - 2 = 73
        assert!((table.calculate_damage(ProjectileKind::Shell, &apc, 50.0) - 73.0).abs() < 1e-9);
    }

    #[test]
    fn test_damage_floor_is_ten_percent() {
        let table = sample_damage_table();
        let mbt = tank(1, 1, 0.0, 0.0);
        // 10 * 0.2 - 10 = -8, floored to 1
        assert!((table.calculate_damage(ProjectileKind::Bullet, &mbt, 10.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_damage_table_passes_base_through() {
        let table = DamageTable::default();
        let mbt = tank(1, 1, 0.0, 0.0);
        assert_eq!(table.multiplier(ProjectileKind::Missile, &mbt), 1.0);
        assert_eq!(table.calculate_damage(ProjectileKind::Missile, &mbt, 80.0), 80.0);
    }

    #[test]
    fn test_weapon_table_equip() {
        let table: WeaponTable = serde_json::from_str(
            r#"{
                "weapons": [
                    { "id": "120mm", "name": "120mm Gun", "projectileType": "Shell", "damage": 60,
                      "range": 3000, "projectileSpeed": 1600, "rateOfFire": 0.1,
                      "magazineSize": 1, "totalAmmo": 40, "reloadTime": 6 }
                ],
                "loadouts": [
                    { "unitCategory": "land", "unitSubcategory": "MainBattleTank",
                      "weapons": [ { "weaponId": "120mm", "count": 1 }, { "weaponId": "ghost" } ] }
                ]
            }"#,
        )
        .unwrap();

        let mut unit = tank(1, 1, 0.0, 0.0);
        assert_eq!(table.equip(&mut unit), 1);
        let slot = &unit.weapons[0];
        assert_eq!(slot.weapon_id, "120mm");
        assert_eq!(slot.current_magazine, 1);
        assert_eq!(slot.current_ammo, 39);
        assert_eq!(table.weapon("120mm").unwrap().projectile_kind(), ProjectileKind::Shell);

        let mut apc = tank(2, 1, 0.0, 0.0);
        apc.subcategory = "APC".into();
        assert_eq!(table.equip(&mut apc), 0);
        assert!(apc.weapons.is_empty());
    }

    #[test]
    fn test_load_json_missing_file() {
        let path = std::path::Path::new("/nonexistent/warsim/weapons.json");
        let err = load_json::<WeaponTable>(path).unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::Io { .. }));
        let fallback: WeaponTable = load_or_default(path);
        assert!(fallback.weapons.is_empty());
    }

    #[test]
    fn test_load_json_malformed_file() {
        let path = std::env::temp_dir().join(format!("warsim-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_json::<DamageTable>(&path).unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::Parse { .. }));
        let _ = std::fs::remove_file(&path);
    }

    // --- Serialization ---

    #[test]
    fn test_world_state_serde() {
        let mut unit = tank(1, 1, 10.0, 20.0);
        unit.weapons.push(WeaponSlot::full("cannon", 1, 10, 40, 5.0));
        let state = WorldState::new(
            vec![unit],
            vec![Projectile {
                id: ProjectileId(7),
                position: GeoPosition::new(10.0, 20.0),
                heading: 45.0,
                speed_mps: 400.0,
                damage: 10.0,
                owner: UnitId(1),
                payload: ProjectilePayload::Bullet {
                    caliber_mm: BULLET_CALIBER_MM,
                },
                range_remaining_m: 1500.0,
            }],
            vec![Faction::new(FactionId(1), "Blue", "#0000FF")],
            12,
        );
        let json = serde_json::to_string(&state).unwrap();
        let back: WorldState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use crate::constants::MAX_HEALTH;
    use crate::types::{normalize_heading, GeoPosition};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        /// Moving a distance along a heading lands that far away.
        #[test]
        fn prop_advance_preserves_distance(
            lat in -60.0f64..60.0,
            lon in -170.0f64..170.0,
            heading in 0.0f64..360.0,
            distance in 0.0f64..5_000.0,
        ) {
            let start = GeoPosition::new(lat, lon);
            let end = start.advanced(heading, distance);
            let measured = start.distance_to(&end);
            prop_assert!((measured - distance).abs() <= distance * 2e-3 + 1e-6);
        }

        /// Normalized headings always fall in [0, 360).
        #[test]
        fn prop_normalize_heading_range(degrees in -1.0e6f64..1.0e6) {
            let h = normalize_heading(degrees);
            prop_assert!((0.0..360.0).contains(&h));
        }

        /// Health never drops below zero regardless of damage sequence.
        #[test]
        fn prop_health_never_negative(hits in proptest::collection::vec(0.0f64..500.0, 0..20)) {
            let mut unit = crate::components::Unit::new(
                crate::types::UnitId(1),
                "u",
                crate::components::UnitKind::Structure,
                "Bunker",
                crate::types::FactionId(1),
                GeoPosition::default(),
            );
            for hit in hits {
                unit.apply_damage(hit);
                prop_assert!(unit.health >= 0.0 && unit.health <= MAX_HEALTH);
            }
        }
    }
}
