use super::*;

fn minimal_spec(id: LayerId, folder: &str) -> LayerSpec {
    LayerSpec {
        id,
        folder: folder.to_string(),
        required: false,
        excluded_from_totals: false,
        structural: false,
        selectable: true,
    }
}

#[test]
fn standard_schema_covers_every_layer_in_draw_order() {
    let schema = LayerSchema::standard();
    let order: Vec<LayerId> = schema.order().map(|spec| spec.id).collect();
    assert_eq!(order, LayerId::ALL);
}

#[test]
fn standard_schema_required_set() {
    let schema = LayerSchema::standard();
    let required: Vec<LayerId> = schema.required().map(|spec| spec.id).collect();
    assert_eq!(
        required,
        vec![
            LayerId::Background,
            LayerId::BodySkin,
            LayerId::Arms,
            LayerId::Underwear,
            LayerId::Face,
            LayerId::Bra,
            LayerId::Mask,
            LayerId::Hair,
            LayerId::Interface,
            LayerId::Team,
            LayerId::Copyright,
            LayerId::Logo,
        ]
    );
}

#[test]
fn standard_schema_flags() {
    let schema = LayerSchema::standard();

    // Decorative layers stay out of the stat aggregate.
    for id in [
        LayerId::Background,
        LayerId::Glow,
        LayerId::Banner,
        LayerId::Decals,
    ] {
        assert!(!schema.counts_toward_totals(id), "{id} should be excluded");
    }
    assert!(schema.counts_toward_totals(LayerId::Hair));
    assert!(schema.counts_toward_totals(LayerId::BodySkin));

    // Structural layers are composited but never summarized.
    for id in [LayerId::Logo, LayerId::Interface, LayerId::Copyright] {
        assert!(schema.spec(id).unwrap().structural);
    }
    assert!(!schema.spec(LayerId::Team).unwrap().structural);

    // Scores has no asset folder to draw from.
    assert!(!schema.spec(LayerId::Scores).unwrap().selectable);
}

#[test]
fn standard_folder_mapping() {
    let schema = LayerSchema::standard();
    assert_eq!(schema.folder(LayerId::BodySkin), Some("21-Body"));
    assert_eq!(schema.folder(LayerId::Logo), Some("01-Logo"));
    assert_eq!(schema.folder(LayerId::Background), Some("29-Background"));
}

#[test]
fn default_filter_exempt_set() {
    let schema = LayerSchema::standard();
    assert!(schema.is_filter_exempt(LayerId::Glow));
    assert!(schema.is_filter_exempt(LayerId::Interface));
    assert!(!schema.is_filter_exempt(LayerId::Hair));
}

#[test]
fn with_filter_exempt_replaces_the_set() {
    let schema = LayerSchema::standard()
        .with_filter_exempt(BTreeSet::from([LayerId::Banner]))
        .unwrap();
    assert!(schema.is_filter_exempt(LayerId::Banner));
    assert!(!schema.is_filter_exempt(LayerId::Glow));
}

#[test]
fn new_rejects_duplicates_and_missing_folders() {
    let dup = vec![
        minimal_spec(LayerId::Hair, "10-Hair"),
        minimal_spec(LayerId::Hair, "10-Hair"),
    ];
    assert!(LayerSchema::new(dup, BTreeSet::new()).is_err());

    let blank = vec![minimal_spec(LayerId::Hair, "  ")];
    assert!(LayerSchema::new(blank, BTreeSet::new()).is_err());

    assert!(LayerSchema::new(vec![], BTreeSet::new()).is_err());
}

#[test]
fn new_rejects_exempt_layer_outside_the_table() {
    let layers = vec![minimal_spec(LayerId::Hair, "10-Hair")];
    let result = LayerSchema::new(layers, BTreeSet::from([LayerId::Glow]));
    assert!(result.is_err());
}

#[test]
fn layer_token_parse_accepts_any_case() {
    assert_eq!("body_skin".parse::<LayerId>().unwrap(), LayerId::BodySkin);
    assert_eq!(" TEAM ".parse::<LayerId>().unwrap(), LayerId::Team);
    assert!("SHOES".parse::<LayerId>().is_err());
}

#[test]
fn layer_serde_uses_catalog_tokens() {
    let json = serde_json::to_string(&LayerId::RearHair).unwrap();
    assert_eq!(json, "\"REAR_HAIR\"");
    let back: LayerId = serde_json::from_str("\"LEFT_WEAPON\"").unwrap();
    assert_eq!(back, LayerId::LeftWeapon);
}
