use routergen::generator::{command_shortener, merge_router_configs};
use routergen::RouterConfig;

fn config(entries: &[(&str, &[&str])]) -> RouterConfig {
    let mut config = RouterConfig::new();
    for (section, lines) in entries {
        config.extend(section, lines.iter().copied());
    }
    config
}

#[cfg(test)]
mod merge_tests {
    use super::*;

    #[test]
    fn test_merge_identity() {
        let a = config(&[("/ip pool", &["add name=a ranges=10.0.0.2-10.0.0.9"])]);
        assert_eq!(merge_router_configs(&[&a]), a);
        assert_eq!(merge_router_configs(&[&a, &RouterConfig::new()]), a);
        assert!(merge_router_configs(&[]).is_empty());
    }

    #[test]
    fn test_merge_is_associative() {
        let a = config(&[("/ip pool", &["add name=a"]), ("", &["# a"])]);
        let b = config(&[("/ppp profile", &["add name=b"]), ("/ip pool", &["add name=b"])]);
        let c = config(&[("/ip pool", &["add name=c"]), ("/ppp secret", &["add name=c"])]);

        let left = merge_router_configs(&[&merge_router_configs(&[&a, &b]), &c]);
        let right = merge_router_configs(&[&a, &merge_router_configs(&[&b, &c])]);
        assert_eq!(left, right);
        assert_eq!(left, merge_router_configs(&[&a, &b, &c]));
    }

    #[test]
    fn test_merge_key_order_is_first_appearance() {
        let a = config(&[("/ip pool", &["add name=a"])]);
        let b = config(&[("/ppp profile", &["add name=b"]), ("/ip pool", &["add name=b"])]);
        let merged = merge_router_configs(&[&a, &b]);
        let sections: Vec<&str> = merged.sections().collect();
        assert_eq!(sections, ["/ip pool", "/ppp profile"]);
        assert_eq!(merged.lines("/ip pool"), ["add name=a", "add name=b"]);
    }

    #[test]
    fn test_shortener_idempotent() {
        let messy = config(&[
            ("", &["# one", "# one", "  "]),
            (
                "/ip address",
                &[
                    "add   address=10.0.0.1/24  interface=bridge",
                    "add address=10.0.0.1/24 interface=bridge",
                    "add comment=\"two  spaces\" address=10.0.1.1/24 interface=bridge",
                ],
            ),
            ("/ip route", &["", "   "]),
        ]);
        let once = command_shortener(&messy);
        assert_eq!(command_shortener(&once), once);
        assert_eq!(once.lines(""), ["# one", "# one"]);
        assert_eq!(
            once.lines("/ip address"),
            [
                "add address=10.0.0.1/24 interface=bridge",
                "add comment=\"two  spaces\" address=10.0.1.1/24 interface=bridge"
            ]
        );
        assert!(!once.contains_section("/ip route"));
    }
}
