pub mod docx_to_pdf;
