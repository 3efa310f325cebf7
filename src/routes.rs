use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::{StreamExt, TryStreamExt};
use log::info;
use std::io::Write;

use crate::error::ProcessingError;
use crate::service::VerifyService;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/verify").route(web::post().to(handle_verify)));
}

async fn handle_verify(
    service: web::Data<VerifyService>,
    mut payload: Multipart,
) -> Result<HttpResponse, ProcessingError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("upload")
            .to_string();

        let mut image_data = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| ProcessingError::InvalidUpload(e.to_string()))?;
            image_data
                .write_all(&data)
                .map_err(|e| ProcessingError::InvalidUpload(e.to_string()))?;
        }
        if !image_data.is_empty() {
            upload = Some((filename, image_data));
            break;
        }
    }

    let (filename, image_data) =
        upload.ok_or_else(|| ProcessingError::InvalidUpload("no file field in request".into()))?;

    let result = service.verify(&image_data, &filename)?;
    info!(
        "verified {}: score {:.4} -> {}",
        result.filename, result.prediction_score, result.result
    );
    Ok(HttpResponse::Ok().json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::model::StubClassifier;
    use actix_web::{test, App};
    use image::{Rgb, RgbImage};
    use serde_json::Value;
    use std::env;
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::Arc;
    use uuid::Uuid;

    const BOUNDARY: &str = "faceverify-test-boundary";

    fn temp_dir() -> PathBuf {
        let dir = env::temp_dir().join(format!("faceverify-routes-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn multipart_body(filename: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn white_png() -> Vec<u8> {
        let img = RgbImage::from_pixel(512, 512, Rgb([255, 255, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    async fn post_verify(score: f32, filename: &str, bytes: &[u8], dir: &PathBuf) -> (u16, Value) {
        let svc = VerifyService::new(Arc::new(StubClassifier(score)), dir);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(svc))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(filename, bytes))
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn spoof_score_yields_not_verified() {
        let dir = temp_dir();
        let (status, body) = post_verify(0.9, "white.png", &white_png(), &dir).await;
        assert_eq!(status, 200);
        assert_eq!(body["filename"], "white.png");
        assert_eq!(body["is_real"], false);
        assert_eq!(body["result"], "Not Verified");
        assert!((body["prediction_score"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
        fs::remove_dir(&dir).unwrap();
    }

    #[actix_web::test]
    async fn real_score_yields_verified() {
        let dir = temp_dir();
        let (status, body) = post_verify(0.25, "selfie.png", &white_png(), &dir).await;
        assert_eq!(status, 200);
        assert_eq!(body["is_real"], true);
        assert_eq!(body["result"], "Verified");
        fs::remove_dir(&dir).unwrap();
    }

    #[actix_web::test]
    async fn garbage_upload_is_a_400_with_detail() {
        let dir = temp_dir();
        let (status, body) = post_verify(0.1, "broken.jpg", b"not an image", &dir).await;
        assert_eq!(status, 400);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error processing image: "));
        assert!(detail.len() > "Error processing image: ".len());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
        fs::remove_dir(&dir).unwrap();
    }

    #[actix_web::test]
    async fn empty_multipart_is_rejected() {
        let dir = temp_dir();
        let svc = VerifyService::new(Arc::new(StubClassifier(0.1)), &dir);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(svc))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(format!("--{BOUNDARY}--\r\n"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        fs::remove_dir(&dir).unwrap();
    }
}
