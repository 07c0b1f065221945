//! Structured section templates
//!
//! All five sections are the same operation: take a sequence from the
//! active bundle and map each element through a per-section template,
//! keeping the authoring order.

use std::fmt;

use serde::Serialize;

use crate::config::SectionsConfig;
use crate::i18n::{BlogPost, Certification, Experience, LanguageBundle, Project};
use super::markup::Markup;

pub const PROJECT_TECH_LABEL: &str = "project_tech_label";
pub const BLOG_PUBLISHED_LABEL: &str = "blog_published";

/// The five structured sections of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Skills,
    Certifications,
    Experiences,
    Projects,
    BlogPosts,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Experiences,
        SectionKind::Projects,
        SectionKind::BlogPosts,
    ];

    /// Dictionary key of the section's sequence
    pub fn sequence_key(&self) -> &'static str {
        match self {
            SectionKind::Skills => "technical_skills",
            SectionKind::Certifications => "certifications",
            SectionKind::Experiences => "experiences",
            SectionKind::Projects => "projects",
            SectionKind::BlogPosts => "blog_posts",
        }
    }

    /// Configured container id for this section
    pub fn container_id<'a>(&self, config: &'a SectionsConfig) -> &'a str {
        match self {
            SectionKind::Skills => &config.skills,
            SectionKind::Certifications => &config.certifications,
            SectionKind::Experiences => &config.experiences,
            SectionKind::Projects => &config.projects,
            SectionKind::BlogPosts => &config.blog_posts,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sequence_key())
    }
}

/// Markup produced for one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub markup: String,
    /// Bundle labels the template wanted but did not find
    pub missing_labels: Vec<&'static str>,
}

/// Renders one structured section from a bundle
pub trait SectionRenderer: Send + Sync {
    fn kind(&self) -> SectionKind;

    /// `None` when the bundle has no sequence for this section
    fn render(&self, bundle: &LanguageBundle) -> Option<RenderedSection>;
}

/// Generic list section: a sequence selector plus a per-item template
pub struct ListSection<T: 'static> {
    kind: SectionKind,
    select: fn(&LanguageBundle) -> Option<&[T]>,
    item: fn(&T, &LanguageBundle, &mut Markup),
    labels: &'static [&'static str],
}

impl<T: 'static> ListSection<T> {
    pub fn new(
        kind: SectionKind,
        select: fn(&LanguageBundle) -> Option<&[T]>,
        item: fn(&T, &LanguageBundle, &mut Markup),
    ) -> Self {
        Self { kind, select, item, labels: &[] }
    }

    /// Bundle labels the template reads
    pub fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }
}

impl<T: 'static> SectionRenderer for ListSection<T> {
    fn kind(&self) -> SectionKind {
        self.kind
    }

    fn render(&self, bundle: &LanguageBundle) -> Option<RenderedSection> {
        let items = (self.select)(bundle)?;

        let mut markup = Markup::new();
        for item in items {
            (self.item)(item, bundle, &mut markup);
        }

        let missing_labels = if items.is_empty() {
            Vec::new()
        } else {
            self.labels.iter().copied().filter(|l| bundle.text(l).is_none()).collect()
        };

        Some(RenderedSection { markup: markup.into_string(), missing_labels })
    }
}

/// The site's five sections in render order
pub fn standard_sections() -> Vec<Box<dyn SectionRenderer>> {
    vec![
        Box::new(ListSection::new(SectionKind::Skills, LanguageBundle::technical_skills, skill_item)),
        Box::new(ListSection::new(
            SectionKind::Certifications,
            LanguageBundle::certifications,
            certification_item,
        )),
        Box::new(ListSection::new(
            SectionKind::Experiences,
            LanguageBundle::experiences,
            experience_item,
        )),
        Box::new(
            ListSection::new(SectionKind::Projects, LanguageBundle::projects, project_item)
                .with_labels(&[PROJECT_TECH_LABEL]),
        ),
        Box::new(
            ListSection::new(SectionKind::BlogPosts, LanguageBundle::blog_posts, blog_post_item)
                .with_labels(&[BLOG_PUBLISHED_LABEL]),
        ),
    ]
}

fn skill_item(skill: &String, _: &LanguageBundle, out: &mut Markup) {
    out.element("li", None, skill);
}

fn certification_item(cert: &Certification, _: &LanguageBundle, out: &mut Markup) {
    out.open("li", Some("certification-item"))
        .empty("div", Some("cert-timeline-dot"))
        .open("div", Some("cert-content"))
        .element("strong", None, &cert.title)
        .element("p", Some("cert-school"), &cert.school);
    if let Some(period) = cert.period.as_deref().filter(|p| !p.is_empty()) {
        out.element("p", Some("cert-period"), period);
    }
    out.element("p", None, &cert.description)
        .close("div")
        .close("li");
}

fn experience_item(exp: &Experience, _: &LanguageBundle, out: &mut Markup) {
    out.open("div", Some("experience-item"))
        .element("h3", None, &exp.position)
        .element("p", Some("exp-company"), &exp.company)
        .element("p", Some("exp-period"), &exp.period)
        .element("p", None, &exp.description)
        .close("div");
}

/// Labelled line: `<p class=".."><span>label</span> value</p>`
///
/// Without a label only the value is emitted.
fn labelled(out: &mut Markup, class: &str, label: Option<&str>, value: &str) {
    out.open("p", Some(class));
    if let Some(label) = label {
        out.element("span", None, label).space();
    }
    out.text(value).close("p");
}

fn project_item(project: &Project, bundle: &LanguageBundle, out: &mut Markup) {
    out.open("div", Some("project-card"))
        .element("h3", None, &project.title);
    labelled(out, "project-tech", bundle.text(PROJECT_TECH_LABEL).as_deref(), &project.tech);
    out.element("p", None, &project.description)
        .close("div");
}

fn blog_post_item(post: &BlogPost, bundle: &LanguageBundle, out: &mut Markup) {
    out.open("article", Some("blog-post"))
        .element("h3", None, &post.title);
    labelled(out, "blog-date", bundle.text(BLOG_PUBLISHED_LABEL).as_deref(), &post.date);
    out.element("p", None, &post.excerpt)
        .close("article");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Dictionary;

    fn bundle(json: &str) -> LanguageBundle {
        let dict = Dictionary::from_json(&format!(r#"{{"en": {}}}"#, json)).unwrap();
        dict.bundle("en").unwrap().clone()
    }

    fn render(kind: SectionKind, bundle: &LanguageBundle) -> Option<RenderedSection> {
        standard_sections()
            .into_iter()
            .find(|s| s.kind() == kind)
            .and_then(|s| s.render(bundle))
    }

    #[test]
    fn test_skills_keep_order() {
        let b = bundle(r#"{"technical_skills": ["X", "Y", "Z"]}"#);
        let rendered = render(SectionKind::Skills, &b).unwrap();
        assert_eq!(rendered.markup, "<li>X</li><li>Y</li><li>Z</li>");
    }

    #[test]
    fn test_certification_period_is_conditional() {
        let b = bundle(
            r#"{"certifications": [
                {"title": "A", "school": "S", "description": "D"},
                {"title": "B", "school": "S", "period": "2020", "description": "D"},
                {"title": "C", "school": "S", "period": "", "description": "D"}
            ]}"#,
        );
        let markup = render(SectionKind::Certifications, &b).unwrap().markup;

        assert_eq!(markup.matches("cert-period").count(), 1);
        assert!(markup.contains(r#"<p class="cert-period">2020</p>"#));
        assert!(markup.starts_with(
            r#"<li class="certification-item"><div class="cert-timeline-dot"></div><div class="cert-content"><strong>A</strong><p class="cert-school">S</p><p>D</p></div></li>"#
        ));
    }

    #[test]
    fn test_experience_template() {
        let b = bundle(
            r#"{"experiences": [{"position": "Dev", "company": "Acme", "period": "2019-2021", "description": "Built things"}]}"#,
        );
        assert_eq!(
            render(SectionKind::Experiences, &b).unwrap().markup,
            r#"<div class="experience-item"><h3>Dev</h3><p class="exp-company">Acme</p><p class="exp-period">2019-2021</p><p>Built things</p></div>"#
        );
    }

    #[test]
    fn test_project_label() {
        let b = bundle(
            r#"{"project_tech_label": "Tech:", "projects": [{"title": "P", "tech": "Rust", "description": "D"}]}"#,
        );
        let rendered = render(SectionKind::Projects, &b).unwrap();
        assert_eq!(
            rendered.markup,
            r#"<div class="project-card"><h3>P</h3><p class="project-tech"><span>Tech:</span> Rust</p><p>D</p></div>"#
        );
        assert!(rendered.missing_labels.is_empty());
    }

    #[test]
    fn test_blog_without_label() {
        let b = bundle(r#"{"blog_posts": [{"title": "T", "date": "2024-01-01", "excerpt": "E"}]}"#);
        let rendered = render(SectionKind::BlogPosts, &b).unwrap();
        assert_eq!(
            rendered.markup,
            r#"<article class="blog-post"><h3>T</h3><p class="blog-date">2024-01-01</p><p>E</p></article>"#
        );
        assert_eq!(rendered.missing_labels, vec![BLOG_PUBLISHED_LABEL]);
    }

    #[test]
    fn test_absent_sequence_and_empty_sequence() {
        let b = bundle(r#"{"projects": []}"#);
        assert!(render(SectionKind::Skills, &b).is_none());

        let rendered = render(SectionKind::Projects, &b).unwrap();
        assert_eq!(rendered.markup, "");
        assert!(rendered.missing_labels.is_empty());
    }

    #[test]
    fn test_fields_are_escaped() {
        let b = bundle(r#"{"technical_skills": ["<img src=x onerror=alert(1)>"]}"#);
        assert_eq!(
            render(SectionKind::Skills, &b).unwrap().markup,
            "<li>&lt;img src=x onerror=alert(1)&gt;</li>"
        );
    }
}
