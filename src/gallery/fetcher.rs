use futures::future::{FutureExt, LocalBoxFuture};

use crate::config::subcategory_photos_path;
use crate::error::FetchError;
use crate::models::gallery_models::{FetchedGallery, SubcategoryPhotosResponse};
use crate::utils::api::Api;

/// Resolves a subcategory id to its photos. Implementations only talk to
/// the network; they never touch presentation state.
pub trait PhotoSource {
    fn fetch_photos(&self, subcategory_id: &str)
        -> LocalBoxFuture<'static, Result<FetchedGallery, FetchError>>;
}

/// Fetches from `GET /api/subcategoria/{id}/fotos/`.
#[derive(Debug, Clone, Default)]
pub struct HttpPhotoSource;

impl PhotoSource for HttpPhotoSource {
    fn fetch_photos(
        &self,
        subcategory_id: &str,
    ) -> LocalBoxFuture<'static, Result<FetchedGallery, FetchError>> {
        let path = subcategory_photos_path(subcategory_id);
        async move {
            let response = Api::get(&path)
                .header("X-Requested-With", "XMLHttpRequest")
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;
            decode_response(status, &body)
        }
        .boxed_local()
    }
}

/// Classifies a raw backend reply.
pub fn decode_response(status: u16, body: &str) -> Result<FetchedGallery, FetchError> {
    if !(200..300).contains(&status) {
        let reason = serde_json::from_str::<SubcategoryPhotosResponse>(body)
            .ok()
            .and_then(|r| r.message);
        return Err(FetchError::Http { status, reason });
    }

    let payload: SubcategoryPhotosResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Application {
            reason: Some(format!("malformed response: {}", e)),
        })?;

    if !payload.success {
        return Err(FetchError::Application {
            reason: payload.message,
        });
    }

    Ok(payload.into_gallery())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_payload_decodes() {
        let body = r#"{"success": true, "subcategoria": {"nombre": "Oficina"},
            "fotos": [{"imagen_url": "/m/1.jpg", "descripcion": "Escritorio"}]}"#;
        let gallery = decode_response(200, body).unwrap();
        assert_eq!(gallery.subcategory.name, "Oficina");
        assert_eq!(gallery.photos.len(), 1);
        assert_eq!(gallery.photos[0].description.as_deref(), Some("Escritorio"));
    }

    #[test]
    fn empty_photo_list_is_still_success() {
        let gallery =
            decode_response(200, r#"{"success": true, "subcategoria": {"nombre": "X"}, "fotos": []}"#)
                .unwrap();
        assert!(gallery.photos.is_empty());
    }

    #[test]
    fn non_2xx_is_http_error_with_backend_message() {
        let err = decode_response(404, r#"{"success": false, "message": "Subcategoría no encontrada"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Http {
                status: 404,
                reason: Some("Subcategoría no encontrada".into())
            }
        );
    }

    #[test]
    fn non_json_error_page_has_no_reason() {
        let err = decode_response(500, "<html>Server Error</html>").unwrap_err();
        assert_eq!(err, FetchError::Http { status: 500, reason: None });
    }

    #[test]
    fn unsuccessful_payload_is_application_error() {
        let err = decode_response(200, r#"{"success": false, "message": "Error interno del servidor"}"#)
            .unwrap_err();
        assert_eq!(err.reason(), Some("Error interno del servidor"));
        assert!(matches!(err, FetchError::Application { .. }));
    }

    #[test]
    fn garbage_body_on_200_is_application_error() {
        let err = decode_response(200, "not json").unwrap_err();
        match err {
            FetchError::Application { reason } => {
                assert!(reason.unwrap().starts_with("malformed response"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
