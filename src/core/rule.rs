use crate::client::Client;
use crate::compare::MatchMethod;
use crate::layout::LayoutKind;

/// Static placement rule matched against a window's class or instance.
#[derive(Debug, Clone, Copy)]
pub struct ClientRule {
    pub pattern: MatchMethod<&'static str>,
    pub workspace: Option<usize>,
    pub monitor: Option<&'static str>,
    pub float: bool,
}

impl ClientRule {
    pub fn applies_to(
        &self,
        class: &str,
        instance: &str,
    ) -> bool {
        self.pattern.matches(class) || self.pattern.matches(instance)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WorkspaceRule {
    pub name: &'static str,
    pub nmaster: usize,
    pub nstack: usize,
    pub gap: i32,
    pub split: f32,
    pub layout: LayoutKind,
}

/// The combined outcome of every client rule that matched a window; later
/// rules override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub float: Option<bool>,
    pub workspace: Option<usize>,
    pub monitor: Option<&'static str>,
}

impl Rules {
    pub fn collect(
        rules: &[ClientRule],
        class: &str,
        instance: &str,
    ) -> Self {
        rules
            .iter()
            .filter(|rule| rule.applies_to(class, instance))
            .fold(Self::default(), |mut acc, rule| {
                debug!("client {} ({}) matched rule {:?}", class, instance, rule.pattern);

                acc.float = Some(rule.float);

                if rule.workspace.is_some() {
                    acc.workspace = rule.workspace;
                    acc.monitor = None;
                } else if rule.monitor.is_some() {
                    acc.monitor = rule.monitor;
                }

                acc
            })
    }

    pub fn propagate(
        &self,
        client: &mut Client,
    ) {
        if let Some(float) = self.float {
            client.floating = float;
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            float: None,
            workspace: None,
            monitor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: [ClientRule; 2] = [
        ClientRule {
            pattern: MatchMethod::Equals("mpv"),
            workspace: None,
            monitor: None,
            float: true,
        },
        ClientRule {
            pattern: MatchMethod::Contains("fox"),
            workspace: Some(1),
            monitor: None,
            float: false,
        },
    ];

    #[test]
    fn rules_match_class_or_instance() {
        let rules = Rules::collect(&RULES, "Navigator", "Firefox");
        assert_eq!(rules.workspace, Some(1));
        assert_eq!(rules.float, Some(false));

        let rules = Rules::collect(&RULES, "mpv", "gl");
        assert_eq!(rules.float, Some(true));
        assert_eq!(rules.workspace, None);

        assert_eq!(Rules::collect(&RULES, "st", "st-256color"), Rules::default());
    }
}
