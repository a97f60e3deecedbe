use embed_resolver::{
    normalize_path, resolve, ExtractionStrategy, MarkerGrammar, MarkerRule, MarkerSpec, NavigationFragment,
    ResolveError, Resolver, ResolverConfig,
};
use embed_test_utils::{config_without_scene_arg, project_fragment, scene_fragment, site_root};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn cfg() -> ResolverConfig {
    ResolverConfig::default()
}

#[test]
fn test_structured_fragments() {
    for raw in [
        "docs/scenes/2d/platformer",
        "docs/scenes/2d/platformer/README",
        "gdEmbed/scenes/2d/platformer/index",
    ] {
        let scene = NavigationFragment::new(raw).scene_path().unwrap();
        assert_eq!(scene.path, "2d/platformer");
        assert_eq!(scene.strategy, ExtractionStrategy::Structured);
    }
}

#[test]
fn test_general_fragment() {
    let scene = NavigationFragment::new("myrepo/2d/bullet_shower").scene_path().unwrap();
    assert_eq!(scene.path, "2d/bullet_shower");
    assert_eq!(scene.strategy, ExtractionStrategy::General);
}

#[test]
fn test_deep_fragment() {
    let scene = NavigationFragment::new("a/b/c/d/README").scene_path().unwrap();
    assert_eq!(scene.path, "c/d");
}

#[test]
fn test_export_dir_stripped_any_case() {
    assert_eq!(normalize_path("proj/Exports/Web/"), "proj");
}

#[test]
fn test_explicit_path_has_no_scene_arg() {
    let demo = resolve("embed-{demo/foo}", "/gdEmbed/scenes/2d/platformer", &cfg()).unwrap();
    assert!(demo.url.ends_with("demo/foo/exports/web/"));
    assert!(!demo.has_scene_arg());
    assert!(demo.is_project_level_embed);
}

#[test]
fn test_legacy_simple() {
    let demo = resolve("embed-demo", "whatever/else", &cfg()).unwrap();
    assert_eq!(demo.scene_name, "demo Project");
    assert_eq!(demo.url, "demo/exports/web/");
}

#[test]
fn test_legacy_scene() {
    let demo = resolve("embed-proj: scenes/2d/platformer/level1", "", &cfg()).unwrap();
    assert!(demo.url.contains("?scene=2d%2Fplatformer"));
    assert_eq!(demo.scene_name, "level1");
    assert!(!demo.is_project_level_embed);
}

#[test]
fn test_legacy_scene_with_placeholder() {
    let resolver = Resolver::new(cfg());
    let demo = resolver.resolve("embed-gdEmbed: {$PATH}/main", &scene_fragment()).unwrap();
    assert_eq!(demo.url, "gdEmbed/exports/web/?scene=2d%2Fplatformer");
    assert_eq!(demo.scene_identifier, "scenes/2d/platformer/main");

    let err = resolver
        .resolve("embed-gdEmbed: {$PATH}/main", &NavigationFragment::new("README"))
        .unwrap_err();
    assert_eq!(err.notice(), "Could not determine current path for {$PATH} expansion");
}

#[test]
fn test_unknown_syntax() {
    let err = resolve("embed-unknown-syntax-###", "", &cfg()).unwrap_err();
    assert_eq!(err, ResolveError::parse("embed-unknown-syntax-###"));
    assert!(!err.depends_on_location());
}

#[test]
fn test_current_path_on_both_layouts() {
    let resolver = Resolver::new(cfg());

    let scene = resolver.resolve("embed-{$PATH}", &scene_fragment()).unwrap();
    assert_eq!(
        scene.absolute_url(&site_root()),
        "https://docs.example/demos/godot-demo-extended/gdEmbed/exports/web/?scene=2d%2Fplatformer"
    );

    let project = resolver.resolve("embed-{$PATH}", &project_fragment()).unwrap();
    assert_eq!(
        project.url,
        "godot-demo-projects/2d/physics_platformer/exports/web/?scene=2d%2Fphysics_platformer"
    );
}

#[test]
fn test_scene_arg_disabled() {
    let resolver = Resolver::new(config_without_scene_arg());
    let demo = resolver.resolve("embed-{$PATH}", &scene_fragment()).unwrap();
    assert_eq!(demo.url, "godot-demo-extended/gdEmbed/exports/web/");
}

#[test]
fn test_custom_rule() {
    struct Shorthand;

    impl MarkerRule for Shorthand {
        fn name(&self) -> &'static str {
            "shorthand"
        }

        fn parse(&self, text: &str) -> Option<MarkerSpec> {
            text.strip_prefix("demo:")
                .map(|path| MarkerSpec::ExplicitProjectPath(path.to_string()))
        }
    }

    let mut grammar = MarkerGrammar::standard();
    grammar.push(Shorthand);
    let resolver = Resolver::new(cfg()).with_grammar(grammar);

    let demo = resolver.resolve("demo:3d/voxel", &NavigationFragment::new("")).unwrap();
    assert_eq!(demo.url, "3d/voxel/exports/web/");
    assert!(resolver.grammar().rule_names().contains(&"shorthand"));
}

#[test]
fn test_resolved_demo_json() {
    let demo = resolve("embed-pong", "", &cfg()).unwrap();
    let json = serde_json::to_value(&demo).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "url": "pong/exports/web/",
            "scene_name": "pong Project",
            "scene_identifier": "pong",
            "is_project_level_embed": true,
        })
    );
}

#[test]
fn test_config_json_defaults() {
    let config: ResolverConfig = serde_json::from_str(r#"{"allow_scene_query_arg": false}"#).unwrap();
    assert_eq!(config, cfg().with_scene_query_arg(false));
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,8}".prop_filter("doc page names are not segments", |s| s != "index")
}

proptest! {
    #[test]
    fn prop_normalize_idempotent(raw in ".{0,40}") {
        let once = normalize_path(&raw);
        prop_assert_eq!(normalize_path(&once), once);
    }

    #[test]
    fn prop_normalize_idempotent_on_paths(raw in "[/a-zA-Z%0-9?#._-]{0,40}(/exports/web)?/?") {
        let once = normalize_path(&raw);
        prop_assert_eq!(normalize_path(&once), once);
    }

    #[test]
    fn prop_structured_extraction(
        prefix in "(gdEmbed/|docs/|)",
        category in segment(),
        scene in segment(),
        suffix in prop_oneof![Just(""), Just("/"), Just("/README"), Just("/index")],
    ) {
        let raw = format!("{prefix}scenes/{category}/{scene}{suffix}");
        let found = NavigationFragment::new(raw).scene_path().unwrap();
        prop_assert_eq!(found.path, format!("{category}/{scene}"));
    }

    #[test]
    fn prop_general_extraction(repo in segment(), category in segment(), project in segment()) {
        prop_assume!(category != "scenes");
        let raw = format!("/{repo}/{category}/{project}/README");
        let found = NavigationFragment::new(raw).scene_path().unwrap();
        prop_assert_eq!(found.path, format!("{category}/{project}"));
    }

    #[test]
    fn prop_explicit_path_never_has_scene_arg(path in "[a-z0-9_]{1,8}(/[a-z0-9_]{1,8}){0,3}", fragment in ".{0,30}") {
        let demo = resolve(&format!("embed-{{{path}}}"), &fragment, &cfg()).unwrap();
        prop_assert!(!demo.has_scene_arg());
        prop_assert!(demo.url.ends_with("exports/web/"));
    }
}
