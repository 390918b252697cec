//! Shared helpers for pipeline integration tests.

use capitulo::{Config, UrlFormat};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A chapter page fixture: one `<p><img></p>` per URL plus decoy images that
/// extraction must ignore.
pub fn chapter_page(image_urls: &[String]) -> String {
    let mut body = String::from(
        "<!DOCTYPE html><html><body>\n<div class=\"header\"><img src=\"/decoy/logo.png\"></div>\n",
    );
    for url in image_urls {
        body.push_str(&format!("<p><img src=\"{url}\"></p>\n"));
    }
    body.push_str("<div class=\"footer\"><img src=\"/decoy/banner.png\"></div>\n");
    body.push_str("</body></html>");
    body
}

/// A small valid PNG payload for image responses.
pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(3, 5, image::Rgb([200, 100, 50]));
    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

/// Mount a chapter page at `/capitulo/{chapter}/` serving the given image URLs.
pub async fn mount_chapter(server: &MockServer, chapter: &str, image_urls: &[String]) {
    Mock::given(method("GET"))
        .and(path(format!("/capitulo/{chapter}/")))
        .respond_with(ResponseTemplate::new(200).set_body_string(chapter_page(image_urls)))
        .mount(server)
        .await;
}

/// Mount an image at the given path serving a valid PNG.
pub async fn mount_image(server: &MockServer, image_path: &str) {
    Mock::given(method("GET"))
        .and(path(image_path.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(png_bytes())
                .insert_header("content-type", "image/png"),
        )
        .mount(server)
        .await;
}

/// A run configuration pointed at the mock server's `/capitulo/` prefix.
pub fn test_config(server: &MockServer, output_dir: &std::path::Path) -> Config {
    Config {
        series: "X".to_string(),
        base_url: format!("{}/capitulo/", server.uri()),
        url_format: UrlFormat::Slash,
        start: "1".to_string(),
        end: "1".to_string(),
        output_dir: output_dir.to_path_buf(),
        user_agent: "capitulo-test".to_string(),
        ..Config::default()
    }
}
