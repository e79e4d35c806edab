use crate::formats::Thumbnail;

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("decode image: {0}")]
    Decode(#[from] image::ImageError),
}

pub fn fetch_thumbnail(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Thumbnail, ThumbnailError> {
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ThumbnailError::Status(status));
    }
    let bytes = response.bytes()?.to_vec();
    decode_thumbnail(url, bytes)
}

pub fn decode_thumbnail(url: &str, bytes: Vec<u8>) -> Result<Thumbnail, ThumbnailError> {
    let format = image::guess_format(&bytes)?;
    let decoded = image::load_from_memory_with_format(&bytes, format)?;
    Ok(Thumbnail {
        url: url.to_owned(),
        format: format!("{format:?}").to_ascii_lowercase(),
        width: decoded.width(),
        height: decoded.height(),
        bytes,
    })
}

/// Downloads thumbnails for `urls`, keeping the input order.
///
/// With `workers <= 1` downloads run one after another on the calling thread. Larger
/// values split the list into contiguous chunks, one scoped thread per chunk. A failed
/// download is logged and yields `None` for that slot only.
pub fn fetch_all(
    client: &reqwest::blocking::Client,
    urls: &[Option<String>],
    workers: usize,
) -> Vec<Option<Thumbnail>> {
    if workers <= 1 || urls.len() <= 1 {
        return urls.iter().map(|url| load(client, url.as_deref())).collect();
    }

    let chunk_len = urls.len().div_ceil(workers);
    std::thread::scope(|scope| {
        let handles = urls
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|url| load(client, url.as_deref()))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

fn load(client: &reqwest::blocking::Client, url: Option<&str>) -> Option<Thumbnail> {
    let url = url?;
    match fetch_thumbnail(client, url) {
        Ok(thumbnail) => Some(thumbnail),
        Err(err) => {
            tracing::warn!(url, %err, "thumbnail unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ThumbnailError, decode_thumbnail};

    static PIXEL_PNG: &[u8] = &[
        137, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13, 73, 72, 68, 82, 0, 0, 0, 1, 0, 0, 0, 1, 8,
        0, 0, 0, 0, 58, 126, 155, 85, 0, 0, 0, 10, 73, 68, 65, 84, 120, 156, 99, 248, 15, 0, 1, 1,
        1, 0, 177, 56, 246, 20, 0, 0, 0, 0, 73, 69, 78, 68, 174, 66, 96, 130,
    ];

    #[test]
    fn decodes_png_dimensions() {
        let thumbnail = decode_thumbnail("http://img/1.png", PIXEL_PNG.to_vec()).unwrap();
        assert_eq!((thumbnail.width, thumbnail.height), (1, 1));
        assert_eq!(thumbnail.format, "png");
        assert_eq!(thumbnail.bytes, PIXEL_PNG);
    }

    #[test]
    fn decodes_encoder_output_with_real_dimensions() {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 3))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let thumbnail = decode_thumbnail("http://img/2x3.png", bytes).unwrap();
        assert_eq!((thumbnail.width, thumbnail.height), (2, 3));
        assert_eq!(thumbnail.format, "png");
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_thumbnail("http://img/1.png", b"not an image".to_vec()).unwrap_err();
        assert!(matches!(err, ThumbnailError::Decode(_)));
    }

    #[test]
    fn no_urls_means_no_requests() {
        let client = reqwest::blocking::Client::new();
        let thumbnails = super::fetch_all(&client, &[None, None, None], 2);
        assert_eq!(thumbnails, vec![None, None, None]);
    }
}
