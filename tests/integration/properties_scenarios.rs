//! Behavioral scenarios for properties-aware hashing
//!
//! Every scenario runs against both backing contexts (archive entry and
//! filesystem snapshot); results must not depend on which one is used.

use super::test_utils::{hash_file, hash_in, Context};
use prophash::hasher::{PropertiesAwareHasher, RawContentHasher, ResourceHasher};
use prophash::normalize::{FilterRule, PropertyFilter};

fn hasher(rules: &[(&str, &[&str])]) -> PropertiesAwareHasher {
    PropertiesAwareHasher::from_rules(rules.iter().map(|(pattern, keys)| {
        FilterRule::new(*pattern, PropertyFilter::ignoring(keys.iter().copied()))
    }))
    .unwrap()
}

/// A scenario: a hasher configuration and a check run per context.
struct Scenario {
    name: &'static str,
    rules: &'static [(&'static str, &'static [&'static str])],
    check: fn(Context, &dyn ResourceHasher),
}

fn run(scenarios: &[Scenario]) {
    for scenario in scenarios {
        let hasher = hasher(scenario.rules);
        for context in Context::ALL {
            eprintln!("scenario {} / {:?}", scenario.name, context);
            (scenario.check)(context, &hasher);
        }
    }
}

const ALL_PROPERTIES: &[(&str, &[&str])] = &[("**/*.properties", &[])];
const IGNORE_CREATED_BY: &[(&str, &[&str])] = &[("**/*.properties", &["created-by"])];

#[test]
fn test_unmatched_paths_pass_through() {
    run(&[
        Scenario {
            name: "non-properties extension",
            rules: ALL_PROPERTIES,
            check: |ctx, h| {
                let content = "b=2\n# comment\na=1\n";
                assert_eq!(
                    hash_file(ctx, h, "some/resource.txt", content),
                    hash_file(ctx, &RawContentHasher, "some/resource.txt", content)
                );
            },
        },
        Scenario {
            name: "no rules at all",
            rules: &[],
            check: |ctx, h| {
                let content = "created-by=X\n";
                assert_eq!(
                    hash_file(ctx, h, "foo.properties", content),
                    hash_file(ctx, &RawContentHasher, "foo.properties", content)
                );
            },
        },
        Scenario {
            name: "unmatched path keeps comment sensitivity",
            rules: &[("config/*.properties", &[])],
            check: |ctx, h| {
                assert_ne!(
                    hash_file(ctx, h, "other/foo.properties", "# one\na=1\n"),
                    hash_file(ctx, h, "other/foo.properties", "# two\na=1\n")
                );
            },
        },
    ]);
}

#[test]
fn test_order_and_whitespace_invariance() {
    run(&[Scenario {
        name: "permuted declarations",
        rules: ALL_PROPERTIES,
        check: |ctx, h| {
            let reference = hash_file(ctx, h, "app.properties", "a=1\nb=2\nc=3\n");
            for variant in [
                "c=3\nb=2\na=1\n",
                "b = 2\r\n  a:1\r\nc 3",
                "\n\n   a=1\nc=3\n\nb=2\n\n",
            ] {
                assert_eq!(hash_file(ctx, h, "app.properties", variant), reference);
            }
        },
    }]);
}

#[test]
fn test_comment_invariance() {
    run(&[
        Scenario {
            name: "comments with ignore-nothing",
            rules: ALL_PROPERTIES,
            check: |ctx, h| {
                let reference = hash_file(ctx, h, "app.properties", "key=value\n");
                for variant in [
                    "# a comment\nkey=value\n",
                    "! bang comment\nkey=value\n# trailing",
                    "   # indented comment with \\uxxxx\nkey=value\n",
                ] {
                    assert_eq!(hash_file(ctx, h, "app.properties", variant), reference);
                }
            },
        },
        Scenario {
            name: "comments with ignore-set",
            rules: IGNORE_CREATED_BY,
            check: |ctx, h| {
                assert_eq!(
                    hash_file(ctx, h, "app.properties", "#Mon Jan 01 00:00:00 UTC 2024\nkey=value\n"),
                    hash_file(ctx, h, "app.properties", "#Tue Feb 02 00:00:00 UTC 2025\nkey=value\n")
                );
            },
        },
    ]);
}

#[test]
fn test_ignored_key_invariance() {
    run(&[Scenario {
        name: "ignored vs non-ignored key changes",
        rules: IGNORE_CREATED_BY,
        check: |ctx, h| {
            let base = hash_file(ctx, h, "META-INF/build.properties", "created-by=A\nversion=1\n");
            assert_eq!(
                hash_file(ctx, h, "META-INF/build.properties", "created-by=B\nversion=1\n"),
                base
            );
            assert_eq!(
                hash_file(ctx, h, "META-INF/build.properties", "version=1\n"),
                base
            );
            assert_ne!(
                hash_file(ctx, h, "META-INF/build.properties", "created-by=A\nversion=2\n"),
                base
            );
        },
    }]);
}

#[test]
fn test_case_sensitivity() {
    run(&[
        Scenario {
            name: "differently cased keys are distinct",
            rules: ALL_PROPERTIES,
            check: |ctx, h| {
                assert_ne!(
                    hash_file(ctx, h, "a.properties", "Created-By=v\n"),
                    hash_file(ctx, h, "a.properties", "created-by=v\n")
                );
            },
        },
        Scenario {
            name: "ignore set does not fold case",
            rules: IGNORE_CREATED_BY,
            check: |ctx, h| {
                assert_ne!(
                    hash_file(ctx, h, "a.properties", "Created-By=1\n"),
                    hash_file(ctx, h, "a.properties", "Created-By=2\n")
                );
                assert_eq!(
                    hash_file(ctx, h, "a.properties", "created-by=1\n"),
                    hash_file(ctx, h, "a.properties", "created-by=2\n")
                );
            },
        },
        Scenario {
            name: "both casings listed separately",
            rules: &[("**/*.properties", &["created-by", "Created-By"])],
            check: |ctx, h| {
                assert_eq!(
                    hash_file(ctx, h, "a.properties", "Created-By=v\n"),
                    hash_file(ctx, h, "a.properties", "created-by=v\n")
                );
            },
        },
    ]);
}

#[test]
fn test_unicode_keys_and_values() {
    run(&[Scenario {
        name: "non-ASCII keys and values",
        rules: &[("**/*.properties", &["ключ"])],
        check: |ctx, h| {
            let base = hash_file(ctx, h, "i18n/messages.properties", "ключ=значение\nnom=café\n");
            assert_eq!(
                hash_file(ctx, h, "i18n/messages.properties", "ключ=другое\nnom=café\n"),
                base
            );
            assert_ne!(
                hash_file(ctx, h, "i18n/messages.properties", "ключ=значение\nnom=cafè\n"),
                base
            );
            // Escaped and literal spellings of the same text are equal
            assert_eq!(
                hash_file(
                    ctx,
                    h,
                    "i18n/messages.properties",
                    "\\u043a\\u043b\\u044e\\u0447=x\nnom=caf\\u00e9\n"
                ),
                base
            );
        },
    }]);
}

#[test]
fn test_filter_union() {
    run(&[Scenario {
        name: "two patterns, two ignore sets",
        rules: &[("**/*.properties", &["K"]), ("**/x.properties", &["L"])],
        check: |ctx, h| {
            let base = hash_file(ctx, h, "dir/x.properties", "K=1\nL=1\nM=1\n");
            assert_eq!(hash_file(ctx, h, "dir/x.properties", "K=2\nL=1\nM=1\n"), base);
            assert_eq!(hash_file(ctx, h, "dir/x.properties", "K=1\nL=2\nM=1\n"), base);
            assert_eq!(hash_file(ctx, h, "dir/x.properties", "K=3\nL=3\nM=1\n"), base);
            assert_ne!(hash_file(ctx, h, "dir/x.properties", "K=1\nL=1\nM=2\n"), base);

            // Only the first rule matches y.properties
            assert_ne!(
                hash_file(ctx, h, "dir/y.properties", "K=1\nL=1\n"),
                hash_file(ctx, h, "dir/y.properties", "K=1\nL=2\n")
            );
        },
    }]);
}

#[test]
fn test_pattern_selectivity() {
    run(&[Scenario {
        name: "foo ignores created-by, bar does not",
        rules: &[
            ("**/*.properties", &[]),
            ("**/foo.properties", &["created-by"]),
        ],
        check: |ctx, h| {
            assert_eq!(
                hash_file(ctx, h, "foo.properties", "created-by=1\n"),
                hash_file(ctx, h, "foo.properties", "created-by=2\n")
            );
            assert_ne!(
                hash_file(ctx, h, "bar.properties", "created-by=1\n"),
                hash_file(ctx, h, "bar.properties", "created-by=2\n")
            );

            let raw = &RawContentHasher;
            for path in ["foo.properties", "bar.properties"] {
                assert_ne!(
                    hash_file(ctx, raw, path, "created-by=1\n"),
                    hash_file(ctx, raw, path, "created-by=2\n")
                );
            }
        },
    }]);
}

#[test]
fn test_malformed_escape_falls_back_to_raw_hash() {
    run(&[
        Scenario {
            name: "bad escape, ignore-nothing",
            rules: ALL_PROPERTIES,
            check: check_malformed_fallback,
        },
        Scenario {
            name: "bad escape, ignore-set",
            rules: IGNORE_CREATED_BY,
            check: check_malformed_fallback,
        },
    ]);
}

fn check_malformed_fallback(ctx: Context, h: &dyn ResourceHasher) {
    for content in [
        "someKey=a value with bad escape sequence \\uxxxx\n",
        "keyWithBadEscapeSequence\\uxxxx=some value\n",
        "created-by=1\nother=\\u12",
    ] {
        assert_eq!(
            hash_file(ctx, h, "some/path/foo.properties", content),
            hash_file(ctx, &RawContentHasher, "some/path/foo.properties", content),
            "content: {:?}",
            content
        );
    }
}

#[test]
fn test_multiple_patterns_matching_one_path() {
    run(&[Scenario {
        name: "f*.properties at two depths",
        rules: &[
            ("**/f*.properties", &["created-by"]),
            ("some/**/f*.properties", &["created-by"]),
        ],
        check: |ctx, h| {
            let foo = hash_file(ctx, h, "foo.properties", "created-by=1\nkey=value\n");
            let fuzz = hash_file(ctx, h, "some/path/fuzz.properties", "created-by=2\nkey=value\n");
            assert_eq!(foo, fuzz);

            // bar.properties matches neither pattern
            assert_ne!(
                hash_file(ctx, h, "bar.properties", "created-by=1\nkey=value\n"),
                hash_file(ctx, h, "bar.properties", "created-by=2\nkey=value\n")
            );
        },
    }]);
}

#[test]
fn test_contexts_agree() {
    let configurations: &[&[(&str, &[&str])]] = &[&[], ALL_PROPERTIES, IGNORE_CREATED_BY];
    let contents = [
        "created-by=1\nkey=value\n",
        "# only a comment\n",
        "bad=\\uzzzz\n",
        "",
    ];
    for rules in configurations {
        let h = hasher(rules);
        for content in contents {
            for path in ["foo.properties", "some/dir/foo.properties", "foo.txt"] {
                assert_eq!(
                    hash_file(Context::Archive, &h, path, content),
                    hash_file(Context::FileSystem, &h, path, content),
                    "rules {:?}, path {}, content {:?}",
                    rules,
                    path,
                    content
                );
            }
        }
    }
}

#[test]
fn test_latin1_bytes_in_dropped_lines() {
    run(&[Scenario {
        name: "ISO-8859-1 comment or ignored value next to UTF-8 value",
        rules: &[("**/*.properties", &["build.by"])],
        check: |ctx, h| {
            let path = "i18n/messages.properties";
            let base = hash_in(ctx, h, path, b"nom=caf\xc3\xa9\n# plain comment\nbuild.by=bob\n");
            assert_eq!(
                hash_in(ctx, h, path, b"nom=caf\xc3\xa9\n# comm\xe9nt\nbuild.by=bob\n"),
                base
            );
            assert_eq!(
                hash_in(ctx, h, path, b"nom=caf\xc3\xa9\n# plain comment\nbuild.by=b\xf6b\n"),
                base
            );
            // The same text in either encoding on a kept line hashes equally
            assert_eq!(hash_in(ctx, h, path, b"nom=caf\xe9\n"), base);
        },
    }]);
}
