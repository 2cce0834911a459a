use pen_gen::{render, LayoutOptions, OutputPaths, RenderRequest};

fn main() {
    // render a few paragraphs of filler text into two columns and export
    // the combined PDF alongside the page images
    let request = RenderRequest {
        text: Some(lipsum::lipsum(800)),
        options: LayoutOptions {
            font_size: 40.0,
            columns: 2,
            jitter: 3,
            ..Default::default()
        },
        export_pdf: true,
        ..Default::default()
    };

    let artifacts = render(request, &OutputPaths::default())
        .expect("render succeeds")
        .expect("filler text always produces output");

    for path in &artifacts.image_paths {
        println!("wrote {}", path.display());
    }
    if let Some(pdf) = &artifacts.pdf_path {
        println!("wrote {}", pdf.display());
    }
}
