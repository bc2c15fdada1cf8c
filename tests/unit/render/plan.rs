use super::*;
use crate::catalog::record::AssetRecord;
use crate::schema::layers::LayerSpec;
use std::collections::BTreeSet;

fn request() -> RenderRequest {
    let mut selected = BTreeMap::new();
    selected.insert(LayerId::Background, "29_001_bg.png".to_string());
    selected.insert(LayerId::BodySkin, "21_001_body.png".to_string());
    selected.insert(LayerId::Hair, "10_001_hair.png".to_string());
    selected.insert(LayerId::Team, "04_001_team_npg.png".to_string());
    selected.insert(LayerId::Copyright, "02_001_copyright.png".to_string());
    RenderRequest {
        selected,
        name: "Akari".to_string(),
        number: 42,
        series: "Series 1".to_string(),
        stats: Stats {
            strength: 1,
            speed: 2,
            skill: 3,
            stamina: 4,
            stealth: 5,
            style: 6,
        },
        qr_payload: "npg-nft-42-1700000000000".to_string(),
        genes: "npg".to_string(),
        template_filename: "05_001_interface.png".to_string(),
        canvas: CanvasSize::default(),
    }
}

fn compile(request: &RenderRequest) -> CardPlan {
    compile_card(request, &LayerSchema::standard(), &CardLayout::standard()).unwrap()
}

#[test]
fn ops_follow_schema_draw_order() {
    let plan = compile(&request());
    let layers: Vec<LayerId> = plan.ops.iter().map(|op| op.layer).collect();
    assert_eq!(
        layers,
        vec![
            LayerId::Background,
            LayerId::BodySkin,
            LayerId::Hair,
            LayerId::Interface,
            LayerId::Team,
            LayerId::Copyright,
            LayerId::Logo,
        ]
    );
}

#[test]
fn interface_op_draws_the_template() {
    let plan = compile(&request());
    let op = plan
        .ops
        .iter()
        .find(|op| op.layer == LayerId::Interface)
        .unwrap();
    assert_eq!(op.role, DrawRole::Template);
    assert_eq!(op.folder, "05-Interface");
    assert_eq!(op.filename, "05_001_interface.png");
}

#[test]
fn logo_resolves_family_badges() {
    let plan = compile(&request());
    let logo = plan.ops.last().unwrap();
    assert_eq!(logo.layer, LayerId::Logo);
    assert_eq!(logo.role, DrawRole::Badge);
    assert_eq!(logo.filename, PRIMARY_BADGE_FILENAME);
    assert_eq!(logo.folder, "01-Logo");

    for token in ["erobot", "EROBOTZ"] {
        let mut req = request();
        req.genes = token.to_string();
        let plan = compile(&req);
        assert_eq!(plan.ops.last().unwrap().filename, SECONDARY_BADGE_FILENAME);
    }
}

#[test]
fn unknown_family_token_skips_the_badge() {
    let mut req = request();
    req.genes = "martian".to_string();
    let plan = compile(&req);
    assert!(plan.ops.iter().all(|op| op.layer != LayerId::Logo));

    req.genes = String::new();
    let plan = compile(&req);
    assert!(plan.ops.iter().all(|op| op.layer != LayerId::Logo));
}

#[test]
fn unselected_layers_produce_no_ops() {
    let plan = compile(&request());
    assert!(plan.ops.iter().all(|op| op.layer != LayerId::Glow));
    assert!(plan.ops.iter().all(|op| op.layer != LayerId::LeftWeapon));
}

#[test]
fn empty_template_filename_is_rejected() {
    let mut req = request();
    req.template_filename = "  ".to_string();
    let result = compile_card(&req, &LayerSchema::standard(), &CardLayout::standard());
    assert!(result.is_err());
}

#[test]
fn schema_without_interface_layer_is_rejected() {
    let layers = vec![LayerSpec {
        id: LayerId::Hair,
        folder: "10-Hair".to_string(),
        required: true,
        excluded_from_totals: false,
        structural: false,
        selectable: true,
    }];
    let schema = LayerSchema::new(layers, BTreeSet::new()).unwrap();
    let result = compile_card(&request(), &schema, &CardLayout::standard());
    assert!(result.is_err());
}

#[test]
fn texts_cover_identity_and_stats() {
    let plan = compile(&request());
    assert_eq!(plan.texts.len(), 3 + STAT_LABELS.len() * 2);

    assert_eq!(plan.texts[0].text, "Akari");
    assert_eq!(plan.texts[1].text, "42");
    assert_eq!(plan.texts[2].text, "1");

    let values: Vec<&str> = plan.texts[3 + STAT_LABELS.len()..]
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(values, vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn qr_overlay_requires_a_payload() {
    let plan = compile(&request());
    let qr = plan.qr.unwrap();
    assert_eq!(qr.payload, "npg-nft-42-1700000000000");
    assert_eq!(qr.placement, CardLayout::standard().qr);

    let mut req = request();
    req.qr_payload = String::new();
    assert!(compile(&req).qr.is_none());
}

#[test]
fn from_record_maps_team_to_family_token() {
    let mut selected = BTreeMap::new();
    selected.insert(
        LayerId::Hair,
        AssetRecord {
            layer: LayerId::Hair,
            filename: "10_001_hair.png".to_string(),
            name: "Ponytail".to_string(),
            character: String::new(),
            genes: String::new(),
            rarity: String::new(),
            stats: Stats::zero(),
        },
    );
    let record = CharacterRecord {
        number: 7,
        name: "Mika".to_string(),
        team: "EROBOTZ".to_string(),
        series: "Series 1".to_string(),
        total_supply: 10_000,
        selected,
        attributes: vec![],
        total_stats: Stats::zero(),
        qr_payload: "npg-nft-7-0".to_string(),
    };

    let req = RenderRequest::from_record(&record, "05_001_interface.png");
    assert_eq!(req.genes, "erobot");
    assert_eq!(req.selected[&LayerId::Hair], "10_001_hair.png");
    assert_eq!(req.number, 7);
    assert_eq!(req.canvas, CanvasSize::default());
}
