mod tests_extractor;
