//! 路径模板匹配模块
//!
//! 支持命名参数（如 `/projects/:project_id`）的轻量级模板匹配器。
//! 路由表以数据的形式持有模板，匹配逻辑在此集中实现，
//! 与具体路由定义完全解耦。

/// 模板中的单个路径段
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// 必须逐字相等的字面段
    Literal(String),
    /// 捕获任意非空段的命名参数（模板中以 `:` 开头）
    Param(String),
}

/// 编译后的路径模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// 编译模板字符串
    ///
    /// 模板形如 `/dashboard/investor` 或 `/projects/:project_id`。
    /// 首尾斜杠与空段被忽略。
    pub fn new(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// 将具体路径与模板匹配
    ///
    /// 段数必须一致；字面段逐字比较，参数段捕获为键值对。
    /// 不匹配时返回 None。
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.push((name.clone(), part.to_string()));
                }
            }
        }
        Some(PathParams(params))
    }
}

/// 一次成功匹配捕获的命名参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_template_matches_exactly() {
        let pattern = PathPattern::new("/dashboard/investor");
        assert!(pattern.matches("/dashboard/investor").is_some());
        assert!(pattern.matches("/dashboard/issuer").is_none());
        assert!(pattern.matches("/dashboard").is_none());
        assert!(pattern.matches("/dashboard/investor/extra").is_none());
    }

    #[test]
    fn named_params_are_captured() {
        let pattern = PathPattern::new("/projects/:project_id");
        let params = pattern.matches("/projects/abc-123").unwrap();
        assert_eq!(params.get("project_id"), Some("abc-123"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn mixed_template() {
        let pattern = PathPattern::new("/signup/:invited_id");
        let params = pattern.matches("/signup/inv42").unwrap();
        assert_eq!(params.get("invited_id"), Some("inv42"));
        assert!(pattern.matches("/signin/inv42").is_none());
    }

    #[test]
    fn slashes_are_normalized() {
        let pattern = PathPattern::new("signin");
        assert!(pattern.matches("/signin").is_some());
        assert!(pattern.matches("/signin/").is_some());
    }

    #[test]
    fn empty_template_matches_root_only() {
        let pattern = PathPattern::new("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/anything").is_none());
    }

    #[test]
    fn param_does_not_match_empty_segment() {
        let pattern = PathPattern::new("/projects/:project_id");
        // "/projects/" 规范化后只剩一段，段数不符
        assert!(pattern.matches("/projects/").is_none());
    }
}
