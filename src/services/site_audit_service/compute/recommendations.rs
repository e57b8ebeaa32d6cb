use crate::models::{Metrics, Priority, Recommendation, Scores};

const KIB: f64 = 1024.0;

fn rec(
    kind: &str,
    priority: Priority,
    title: &str,
    description: String,
    implementation: &str,
    estimated_impact: &str,
) -> Recommendation {
    Recommendation {
        kind: kind.to_string(),
        priority,
        title: title.to_string(),
        description,
        implementation: implementation.to_string(),
        estimated_impact: estimated_impact.to_string(),
    }
}

/// Builds the fix list for one audit, most urgent first.
pub fn recommend(scores: &Scores, metrics: &Metrics) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if let Some(lcp) = metrics.lcp.filter(|v| *v > 2500.0) {
        out.push(rec(
            "lcp",
            Priority::High,
            "Speed up Largest Contentful Paint",
            format!("The largest element renders after {:.0} ms.", lcp),
            "Preload the hero image, serve it responsive and compressed, and avoid render-blocking resources above the fold.",
            "LCP improvement of 1-2 s",
        ));
    }
    if let Some(tbt) = metrics.tbt.filter(|v| *v > 300.0) {
        out.push(rec(
            "javascript",
            Priority::High,
            "Reduce main-thread blocking",
            format!("Long tasks block the main thread for {:.0} ms.", tbt),
            "Split long tasks, defer third-party tags, and move heavy work off the main thread.",
            "TBT reduction of 50% or more",
        ));
    }
    if let Some(cls) = metrics.cls.filter(|v| *v > 0.1) {
        out.push(rec(
            "layout",
            Priority::High,
            "Stabilize page layout",
            format!("Cumulative layout shift is {:.3}.", cls),
            "Reserve space for images, embeds and ads with explicit dimensions or aspect-ratio.",
            "CLS under 0.1",
        ));
    }
    if let Some(ttfb) = metrics.ttfb.filter(|v| *v > 600.0) {
        out.push(rec(
            "server",
            Priority::Medium,
            "Improve server response time",
            format!("The document took {:.0} ms to start arriving.", ttfb),
            "Cache rendered pages at the edge and review slow backend calls.",
            "TTFB under 600 ms",
        ));
    }
    if let Some(bytes) = metrics.unused_js.filter(|v| *v > 20.0 * KIB) {
        out.push(rec(
            "javascript",
            Priority::Medium,
            "Remove unused JavaScript",
            format!("{:.0} KiB of JavaScript is never executed.", bytes / KIB),
            "Code-split by route and drop unused dependencies.",
            "Smaller bundles and faster interactivity",
        ));
    }
    if let Some(bytes) = metrics.unused_css.filter(|v| *v > 20.0 * KIB) {
        out.push(rec(
            "css",
            Priority::Medium,
            "Remove unused CSS",
            format!("{:.0} KiB of CSS rules are unused.", bytes / KIB),
            "Purge unused selectors at build time and inline critical CSS.",
            "Faster first render",
        ));
    }
    if let Some(bytes) = metrics.unoptimized_images.filter(|v| *v > 50.0 * KIB) {
        out.push(rec(
            "images",
            Priority::Medium,
            "Optimize images",
            format!("Images could be {:.0} KiB smaller.", bytes / KIB),
            "Re-encode images as WebP/AVIF at appropriate quality and size.",
            "Lower transfer size and faster LCP",
        ));
    }
    if scores.accessibility < 0.9 {
        out.push(rec(
            "accessibility",
            Priority::Low,
            "Fix accessibility findings",
            format!("Accessibility score is {:.0}/100.", scores.accessibility * 100.0),
            "Address missing labels, contrast issues and alt text reported by the audit.",
            "Accessibility score of 90 or more",
        ));
    }
    if scores.seo < 0.9 {
        out.push(rec(
            "seo",
            Priority::Low,
            "Fix SEO findings",
            format!("SEO score is {:.0}/100.", scores.seo * 100.0),
            "Add meta descriptions, descriptive link text and a valid robots.txt.",
            "SEO score of 90 or more",
        ));
    }

    out.sort_by_key(|r| r.priority);
    out
}
