//! Tests for the trained chain session object

#[cfg(test)]
mod tests {
    use markovtile::{Kernel, MarkovChain, MarkovError, RandomSelector, SubKernelCache, TileGrid};

    fn kernel() -> Kernel {
        Kernel::parse("01\n11").unwrap()
    }

    // Tests a chain keeps its kernel, family and report
    // Verified by storing the family without the kernel itself
    #[test]
    fn test_train_accessors() {
        let mut cache = SubKernelCache::new();
        let grids = vec![TileGrid::parse("AB\nBA").unwrap()];
        let chain = MarkovChain::train(kernel(), &grids, &mut cache).unwrap();

        assert_eq!(chain.kernel(), &kernel());
        assert_eq!(chain.sub_kernels().len(), 8);
        assert_eq!(chain.sub_kernels().first(), Some(&kernel()));
        assert_eq!(chain.report().cells, 4);
        assert_eq!(chain.table().total_observations(), 32);
    }

    // Tests training without grids is rejected before decomposition
    // Verified by decomposing the kernel before checking the input
    #[test]
    fn test_empty_training_set() {
        let mut cache = SubKernelCache::new();
        let result = MarkovChain::train(kernel(), &[], &mut cache);

        assert!(matches!(result, Err(MarkovError::EmptyTrainingSet)));
        assert!(cache.is_empty());
    }

    // Tests jagged text maps report the index of the offending map
    // Verified by dropping the map index from the error context
    #[test]
    fn test_from_texts_reports_map_index() {
        let mut cache = SubKernelCache::new();
        let result = MarkovChain::from_texts(kernel(), &["AB\nBA", "AB\nB"], &mut cache);

        match result {
            Err(MarkovError::JaggedGrid { grid, row, .. }) => {
                assert_eq!(grid, Some(1));
                assert_eq!(row, 1);
            }
            other => unreachable!("Expected JaggedGrid, got {other:?}"),
        }
    }

    // Tests parallel and sequential chains hold equal tables
    // Verified by training only the first grid in parallel mode
    #[test]
    fn test_parallel_chain_matches() {
        let mut cache = SubKernelCache::new();
        let grids = vec![
            TileGrid::parse("ABAB\nBABA").unwrap(),
            TileGrid::parse("CC\nCA").unwrap(),
        ];
        let sequential = MarkovChain::train(kernel(), &grids, &mut cache).unwrap();
        let parallel = MarkovChain::train_parallel(kernel(), &grids, &mut cache).unwrap();

        assert_eq!(sequential.table(), parallel.table());
    }

    // Tests a reused cache decomposes a kernel only once
    // Verified by bypassing the cache when training
    #[test]
    fn test_cache_reused_across_chains() {
        let mut cache = SubKernelCache::new();
        let grids = vec![TileGrid::parse("AB").unwrap()];
        let _ = MarkovChain::train(kernel(), &grids, &mut cache).unwrap();
        let misses = cache.stats.misses;
        let _ = MarkovChain::train(kernel(), &grids, &mut cache).unwrap();

        assert_eq!(cache.stats.misses, misses);
    }

    // Tests the first batch grid equals seeded generation with the batch seed
    // Verified by offsetting batch seeds from one
    #[test]
    fn test_batch_matches_seeded() {
        let mut cache = SubKernelCache::new();
        let chain =
            MarkovChain::from_texts(kernel(), &["ABCA\nBCAB\nCABC"], &mut cache).unwrap();

        let batch = chain.generate_batch(3, 6, 4, 99).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.first(), Some(&chain.generate_seeded(6, 4, 99).unwrap()));
        assert_eq!(batch.get(2), Some(&chain.generate_seeded(6, 4, 101).unwrap()));
    }

    // Tests generation with an explicit selector equals seeded generation
    // Verified by ignoring the given selector
    #[test]
    fn test_generate_with_selector() {
        let mut cache = SubKernelCache::new();
        let chain = MarkovChain::from_texts(kernel(), &["AAB\nBBA"], &mut cache).unwrap();

        let explicit = chain.generate(5, 5, &mut RandomSelector::new(8)).unwrap();
        assert_eq!(explicit, chain.generate_seeded(5, 5, 8).unwrap());
    }

    // Tests batch generation validates dimensions up front
    // Verified by generating an empty batch for zero width
    #[test]
    fn test_batch_invalid_dimensions() {
        let mut cache = SubKernelCache::new();
        let chain = MarkovChain::from_texts(kernel(), &["AB"], &mut cache).unwrap();

        assert!(matches!(
            chain.generate_batch(2, 0, 3, 1),
            Err(MarkovError::InvalidParameter { parameter: "width", .. })
        ));
    }

    // Tests the summary reflects the trained table
    // Verified by counting observations per pattern instead of per tile
    #[test]
    fn test_summary() {
        let mut cache = SubKernelCache::new();
        let chain = MarkovChain::from_texts(kernel(), &["AB\nBA"], &mut cache).unwrap();
        let summary = chain.summary();

        assert_eq!(summary.alphabet, vec!['A', 'B']);
        assert_eq!(summary.observations, 32);
        assert_eq!(summary.unconditional_patterns(), 1);
    }
}
